//! Integration tests for the dispatcher loop: spawned chat calls and timers
//! feeding their completions back into the core as events.

use gatewood::chat::{ChatResult, FunctionCall, Message, Part, Role, ScriptedChatService};
use gatewood::game::engine::Event;
use gatewood::world::demo;
use gatewood::{Dispatcher, Key, TurnState};
use serde_json::json;
use std::sync::Arc;

fn dispatcher(replies: Vec<ChatResult>) -> Dispatcher<ScriptedChatService> {
    let world = Arc::new(demo::world().expect("demo world should validate"));
    Dispatcher::new(world, ScriptedChatService::new(replies))
}

/// Walks the player from the starting square into the town merchant, opening
/// a dialog.
fn walk_to_merchant(dispatcher: &mut Dispatcher<ScriptedChatService>) {
    for key in [
        Key::Right,
        Key::Up,
        Key::Up,
        Key::Up,
        Key::Up,
        Key::Left,
        Key::Left,
    ] {
        dispatcher.process(Event::KeyDown(key));
    }
    assert!(
        dispatcher.state().in_dialog(),
        "the walk should end at the merchant"
    );
}

fn type_line(dispatcher: &mut Dispatcher<ScriptedChatService>, line: &str) {
    for c in line.chars() {
        dispatcher.process(Event::KeyDown(Key::Char(c)));
    }
    dispatcher.process(Event::KeyDown(Key::Enter));
}

fn sell_rope_reply() -> ChatResult {
    ChatResult::Success(Message {
        role: Role::Model,
        parts: vec![
            Part::Text("Ten gold and it is yours.".to_string()),
            Part::FunctionCall(FunctionCall {
                name: "sell_item".to_string(),
                args: json!({"object_id": "rope", "price": 10}),
            }),
        ],
    })
}

fn open_door_reply() -> ChatResult {
    ChatResult::Success(Message {
        role: Role::Model,
        parts: vec![Part::FunctionCall(FunctionCall {
            name: "open_door".to_string(),
            args: json!({}),
        })],
    })
}

/// Drives a complete confirmed sale: message out, function call back,
/// player confirmation, function response out, closing pleasantry back.
#[tokio::test]
async fn test_confirmed_sale_round_trip() {
    let mut dispatcher = dispatcher(vec![
        sell_rope_reply(),
        ChatResult::Success(Message::model_text("A pleasure doing business.")),
    ]);

    walk_to_merchant(&mut dispatcher);
    type_line(&mut dispatcher, "I will take the rope");

    // The first spawned call completes with the sell_item function call.
    assert!(dispatcher.step().await);
    {
        let window = dispatcher
            .state()
            .chat_window
            .as_ref()
            .expect("still in dialog");
        assert!(matches!(
            window.turn,
            TurnState::ConfirmingAction { .. }
        ));
    }
    assert_eq!(dispatcher.state().inventory.quantity("rope"), 0);

    // Confirm; the follow-up request is spawned and completes.
    dispatcher.process(Event::KeyDown(Key::Char('y')));
    assert_eq!(dispatcher.state().inventory.quantity("rope"), 1);
    assert_eq!(dispatcher.state().inventory.quantity("gold_coin"), 20);

    assert!(dispatcher.step().await);
    let window = dispatcher
        .state()
        .chat_window
        .as_ref()
        .expect("dialog continues after a sale");
    assert_eq!(window.turn, TurnState::user_turn());
    assert_eq!(
        window.contents.last().map(|m| m.text()),
        Some("A pleasure doing business.".to_string())
    );
}

/// An open_door reply teleports the player, schedules the closing timer, and
/// the timer's elapse closes the dialog.
#[tokio::test(start_paused = true)]
async fn test_gate_opening_closes_dialog_after_timer() {
    let mut dispatcher = dispatcher(vec![open_door_reply()]);

    walk_to_merchant(&mut dispatcher);
    type_line(&mut dispatcher, "open the gate");

    // Function-call reply arrives; the gate action resolves immediately.
    assert!(dispatcher.step().await);
    assert_eq!(dispatcher.state().player.map_id, "forest");
    {
        let window = dispatcher
            .state()
            .chat_window
            .as_ref()
            .expect("dialog lingers during the closing animation");
        assert_eq!(window.turn, TurnState::AnimatingBeforeEndChat);
    }

    // Paused time auto-advances through the 2000 ms sleep.
    assert!(dispatcher.step().await);
    assert!(!dispatcher.state().in_dialog());
    assert_eq!(dispatcher.state().player.map_id, "forest");
}

/// Escaping while a request is in flight leaves a stale completion in the
/// queue; delivering it to the core is a no-op.
#[tokio::test]
async fn test_stale_completion_after_escape_is_rejected() {
    let mut dispatcher = dispatcher(vec![ChatResult::Success(Message::model_text("too late"))]);

    walk_to_merchant(&mut dispatcher);
    type_line(&mut dispatcher, "hello");
    dispatcher.process(Event::KeyDown(Key::Escape));
    assert!(!dispatcher.state().in_dialog());

    // The spawned call still completes and is still delivered to the core.
    assert!(dispatcher.step().await);
    assert!(!dispatcher.state().in_dialog());

    // The session carries on normally.
    dispatcher.process(Event::KeyDown(Key::Down));
    assert_eq!(dispatcher.state().player.map_id, "town");
}

/// A transport-level failure folds into a failure result, which abandons the
/// dialog without crashing the loop.
#[tokio::test]
async fn test_failure_result_returns_player_to_navigation() {
    let mut dispatcher = dispatcher(vec![ChatResult::Failure("connection refused".to_string())]);

    walk_to_merchant(&mut dispatcher);
    type_line(&mut dispatcher, "hello");

    assert!(dispatcher.step().await);
    assert!(!dispatcher.state().in_dialog());
}
