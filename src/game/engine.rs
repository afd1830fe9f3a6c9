//! # Engine
//!
//! The single entry point of the game core: a synchronous reducer mapping the
//! current state and one event to a replacement state plus a list of
//! side-effect commands.
//!
//! The engine never performs I/O and never suspends. Timers and chat requests
//! exist only as [`Command`] values; the dispatcher interprets them and feeds
//! their completions back in as new events.

use crate::chat::ChatResult;
use crate::game::state::GameState;
use crate::game::{dialog, navigation};
use crate::input::Key;
use crate::world::WorldConfig;

/// An event consumed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A key press from the input surface
    KeyDown(Key),
    /// Completion of a chat request, successful or not
    ChatResponse(ChatResult),
    /// A previously requested timer elapsed
    TimerElapsed,
}

/// A declarative side-effect request for the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Schedule a `TimerElapsed` event after the given delay
    StartTimer { duration_ms: u64 },
    /// Issue a chat request for the current chat window. The dispatcher must
    /// read the freshly committed window's contents and NPC id at dispatch
    /// time, not at emission time.
    SendChatRequest,
}

/// The result of handling one event: the replacement state and the commands
/// to run.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: GameState,
    pub commands: Vec<Command>,
}

/// Handles one event against a complete state snapshot.
///
/// Key presses are routed to the dialog state machine while a chat window is
/// open and to world navigation otherwise; chat completions and timer elapses
/// go to the dialog handlers, whose turn-state guards reject anything stale.
///
/// # Examples
///
/// ```
/// use gatewood::game::engine::{handle_event, Event};
/// use gatewood::world::demo;
/// use gatewood::{GameState, Key};
///
/// let world = demo::world().unwrap();
/// let state = GameState::new(&world);
/// let transition = handle_event(&world, state, Event::KeyDown(Key::Char('s')));
/// assert!(transition.commands.is_empty());
/// ```
pub fn handle_event(world: &WorldConfig, state: GameState, event: Event) -> Transition {
    let mut state = state;
    let commands = match event {
        Event::KeyDown(key) => handle_keydown(world, &mut state, key),
        Event::ChatResponse(result) => dialog::handle_response(world, &mut state, result),
        Event::TimerElapsed => dialog::handle_timer(&mut state),
    };
    Transition { state, commands }
}

fn handle_keydown(world: &WorldConfig, state: &mut GameState, key: Key) -> Vec<Command> {
    if state.in_dialog() {
        return dialog::handle_key(world, state, key);
    }
    // Any key acknowledges the splash; a movement key still takes effect on
    // the same press.
    if state.splash_text.is_some() {
        state.splash_text = None;
    }
    if let Some(direction) = key.movement_direction() {
        navigation::handle_movement(world, state, direction);
    }
    Vec::new()
}
