//! # Dialog State Machine
//!
//! The chat turn lifecycle: composing, awaiting the AI, confirming a gated
//! action, and the closing animation before a forced exit.
//!
//! Every handler here is a pure transition over `GameState`; requests to
//! start a timer or issue a chat call are returned as [`Command`] values for
//! the dispatcher. Stale completions (a response or timer arriving after the
//! state has moved on) are rejected by the turn-state guards.

use crate::chat::{ChatResult, Message};
use crate::game::actions::{self, Action};
use crate::game::engine::Command;
use crate::game::state::{GameState, TurnState};
use crate::input::Key;
use crate::world::WorldConfig;

/// Handles a key press while a dialog is open.
pub(crate) fn handle_key(world: &WorldConfig, state: &mut GameState, key: Key) -> Vec<Command> {
    if state.chat_window.is_none() {
        return Vec::new();
    }
    // Escape discards the dialog from every turn state, cancelling any
    // in-flight request by leaving its completion nothing to apply to.
    if key == Key::Escape {
        state.chat_window = None;
        return Vec::new();
    }

    let mut commands = Vec::new();
    let mut settled: Option<(Action, bool)> = None;

    if let Some(window) = state.chat_window.as_mut() {
        let submitted = match &mut window.turn {
            TurnState::UserTurn { current_message } => match key {
                Key::Char(c) => {
                    current_message.push(c);
                    None
                }
                Key::Backspace => {
                    current_message.pop();
                    None
                }
                Key::Enter if !current_message.is_empty() => {
                    Some(std::mem::take(current_message))
                }
                _ => None,
            },
            TurnState::ConfirmingAction { pending } => {
                match key {
                    Key::Char('y') => settled = Some((pending.clone(), true)),
                    Key::Char('n') => settled = Some((pending.clone(), false)),
                    _ => {}
                }
                None
            }
            // No input accepted while waiting or animating (except Escape,
            // handled above).
            TurnState::WaitingForAi | TurnState::AnimatingBeforeEndChat => None,
        };

        if let Some(text) = submitted {
            window.append_message(Message::user_text(text));
            window.turn = TurnState::WaitingForAi;
            commands.push(Command::SendChatRequest);
        }
    }

    if let Some((action, accepted)) = settled {
        commands = settle_action(world, state, &action, accepted);
    }
    commands
}

/// Handles the completion of a chat request.
///
/// Ignored unless a dialog is open and awaiting the AI; a stale response is a
/// no-op. A failure, or a function call the resolver does not recognize,
/// abandons the dialog.
pub(crate) fn handle_response(
    world: &WorldConfig,
    state: &mut GameState,
    result: ChatResult,
) -> Vec<Command> {
    let waiting = matches!(
        state.chat_window.as_ref().map(|window| &window.turn),
        Some(TurnState::WaitingForAi)
    );
    if !waiting {
        return Vec::new();
    }

    let message = match result {
        ChatResult::Success(message) => message,
        ChatResult::Failure(_) => {
            state.chat_window = None;
            return Vec::new();
        }
    };

    let call = message.function_call().cloned();
    if let Some(window) = state.chat_window.as_mut() {
        window.append_message(message);
    }

    let Some(call) = call else {
        if let Some(window) = state.chat_window.as_mut() {
            window.turn = TurnState::user_turn();
        }
        return Vec::new();
    };

    let Some(action) = actions::parse_function_call(&call) else {
        state.chat_window = None;
        return Vec::new();
    };

    if actions::needs_confirmation(&action) {
        if let Some(window) = state.chat_window.as_mut() {
            window.turn = TurnState::ConfirmingAction { pending: action };
        }
        Vec::new()
    } else {
        settle_action(world, state, &action, true)
    }
}

/// Handles a timer elapse: closes the dialog if (and only if) it is in the
/// closing animation.
pub(crate) fn handle_timer(state: &mut GameState) -> Vec<Command> {
    if matches!(
        state.chat_window.as_ref().map(|window| &window.turn),
        Some(TurnState::AnimatingBeforeEndChat)
    ) {
        state.chat_window = None;
    }
    Vec::new()
}

/// Resolves an accepted or rejected action: performs it (when accepted),
/// records the function response in both logs, and advances the turn state.
fn settle_action(
    world: &WorldConfig,
    state: &mut GameState,
    action: &Action,
    accepted: bool,
) -> Vec<Command> {
    let response = if accepted {
        actions::perform(world, state, action)
    } else {
        actions::rejection()
    };

    let Some(window) = state.chat_window.as_mut() else {
        return Vec::new();
    };
    window.append_function_response(action.function_name(), response, action.clone(), accepted);

    if accepted && action.exits_dialog() {
        window.turn = TurnState::AnimatingBeforeEndChat;
        vec![Command::StartTimer {
            duration_ms: crate::config::END_CHAT_ANIMATION_MS,
        }]
    } else {
        window.turn = TurnState::WaitingForAi;
        vec![Command::SendChatRequest]
    }
}
