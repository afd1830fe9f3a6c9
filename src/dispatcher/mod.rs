//! # Dispatcher Module
//!
//! The effect runner around the pure core. The dispatcher owns the single
//! `GameState` value between events, serializes event delivery, and
//! interprets the engine's commands: timers become spawned sleeps, chat
//! requests become spawned service calls, and every completion re-enters the
//! core as an ordinary event.
//!
//! Stale completions are deliberately still delivered to the core rather
//! than filtered here; the core's turn-state guards are the single source of
//! truth for what still applies.

use crate::chat::{ChatRequest, ChatService};
use crate::game::engine::{self, Command, Event, Transition};
use crate::game::state::{ChatHistoryEntry, GameState};
use crate::world::WorldConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Owns the event loop around the engine.
///
/// Events arrive over an unbounded channel; [`Dispatcher::step`] processes
/// exactly one event to completion, including committing the resulting state,
/// before the next is accepted. Completions of spawned effects feed back into
/// the same channel.
pub struct Dispatcher<C: ChatService> {
    world: Arc<WorldConfig>,
    client: Arc<C>,
    state: GameState,
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    logged_history: usize,
}

impl<C: ChatService + 'static> Dispatcher<C> {
    /// Creates a dispatcher with the session-start state for `world`.
    pub fn new(world: Arc<WorldConfig>, client: C) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = GameState::new(&world);
        Self {
            world,
            client: Arc::new(client),
            state,
            tx,
            rx,
            logged_history: 0,
        }
    }

    /// A sender for feeding external events (key presses) into the loop.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    /// The current committed state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Processes one event synchronously: runs the engine, commits the new
    /// state, then launches the requested effects.
    pub fn process(&mut self, event: Event) {
        log::debug!("event: {:?}", event);
        let Transition { state, commands } =
            engine::handle_event(&self.world, self.state.clone(), event);
        self.state = state;
        self.log_changes();
        for command in commands {
            self.run_command(command);
        }
    }

    /// Receives and processes the next event. Returns `false` once the
    /// channel is closed and drained.
    pub async fn step(&mut self) -> bool {
        match self.rx.recv().await {
            Some(event) => {
                self.process(event);
                true
            }
            None => false,
        }
    }

    /// Runs the event loop until the channel closes.
    pub async fn run(mut self) {
        while self.step().await {}
    }

    fn run_command(&self, command: Command) {
        match command {
            Command::StartTimer { duration_ms } => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(duration_ms)).await;
                    let _ = tx.send(Event::TimerElapsed);
                });
            }
            Command::SendChatRequest => {
                // Read the freshly committed window, not whatever was current
                // when the command was emitted.
                let Some(window) = self.state.chat_window.as_ref() else {
                    log::warn!("chat request emitted with no open chat window");
                    return;
                };
                let request = ChatRequest {
                    access_key: String::new(),
                    npc_id: window.npc_id.clone(),
                    contents: window.contents.clone(),
                };
                let tx = self.tx.clone();
                let client = Arc::clone(&self.client);
                tokio::spawn(async move {
                    let result = client.send(request).await;
                    let _ = tx.send(Event::ChatResponse(result));
                });
            }
        }
    }

    /// Logs display-log entries appended by the last transition, plus any
    /// active splash text.
    fn log_changes(&mut self) {
        match self.state.chat_window.as_ref() {
            Some(window) => {
                for entry in window.history.iter().skip(self.logged_history) {
                    log::info!("{}", format_entry(entry));
                }
                self.logged_history = window.history.len();
            }
            None => {
                self.logged_history = 0;
            }
        }
        if let Some(splash) = self.state.splash_text.as_deref() {
            log::info!("* {}", splash);
        }
    }
}

fn format_entry(entry: &ChatHistoryEntry) -> String {
    match entry {
        ChatHistoryEntry::Text { role, content } => match role {
            crate::chat::Role::User => format!("you: {}", content),
            crate::chat::Role::Model => format!("npc: {}", content),
        },
        ChatHistoryEntry::Action { action, accepted } => {
            let verdict = if *accepted { "accepted" } else { "declined" };
            format!("[{} {}]", action.function_name(), verdict)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatResult, Message, ScriptedChatService};
    use crate::game::Location;
    use crate::input::Key;

    fn dispatcher(replies: Vec<ChatResult>) -> Dispatcher<ScriptedChatService> {
        let world = Arc::new(crate::world::demo::world().expect("demo world should validate"));
        Dispatcher::new(world, ScriptedChatService::new(replies))
    }

    fn type_line(dispatcher: &mut Dispatcher<ScriptedChatService>, line: &str) {
        for c in line.chars() {
            dispatcher.process(Event::KeyDown(Key::Char(c)));
        }
        dispatcher.process(Event::KeyDown(Key::Enter));
    }

    #[tokio::test]
    async fn test_chat_round_trip() {
        let mut dispatcher = dispatcher(vec![ChatResult::Success(Message::model_text(
            "Fine weather today.",
        ))]);

        // Walk into the merchant and send a message.
        dispatcher.state.player = Location::new("town", 4, 4);
        dispatcher.process(Event::KeyDown(Key::Up));
        assert!(dispatcher.state().in_dialog());
        type_line(&mut dispatcher, "hello");

        // The spawned service call completes and re-enters the core.
        assert!(dispatcher.step().await);
        let window = dispatcher.state().chat_window.as_ref().expect("still in dialog");
        assert_eq!(
            window.turn,
            crate::game::state::TurnState::user_turn()
        );
        assert_eq!(window.contents.len(), 3); // intro, user, reply
    }

    #[tokio::test]
    async fn test_failure_response_closes_dialog() {
        let mut dispatcher = dispatcher(vec![ChatResult::Failure("boom".to_string())]);
        dispatcher.state.player = Location::new("town", 4, 4);
        dispatcher.process(Event::KeyDown(Key::Up));
        type_line(&mut dispatcher, "hello");

        assert!(dispatcher.step().await);
        assert!(!dispatcher.state().in_dialog());
    }

    #[tokio::test]
    async fn test_external_sender_feeds_loop() {
        let mut dispatcher = dispatcher(vec![]);
        let sender = dispatcher.sender();
        sender
            .send(Event::KeyDown(Key::Char('s')))
            .expect("channel should be open");
        assert!(dispatcher.step().await);
        assert_eq!(dispatcher.state().player.position, crate::Position::new(5, 8));
    }
}
