//! Integration test to ensure a session can start up without errors.

use gatewood::game::engine::{handle_event, Event};
use gatewood::world::demo;
use gatewood::{GameState, GatewoodResult, Key};

#[test]
fn test_basic_startup() -> GatewoodResult<()> {
    let world = demo::world()?;
    let state = GameState::new(&world);

    // The session starts navigating, on a defined map, with the seeded purse.
    assert!(state.chat_window.is_none());
    assert!(state.splash_text.is_none());
    assert!(world.map(&state.player.map_id).is_some());
    assert_eq!(state.inventory.quantity("gold_coin"), 30);

    // The first few key presses process without incident.
    let mut state = state;
    for key in [Key::Down, Key::Right, Key::Up, Key::Char('q')] {
        let transition = handle_event(&world, state, Event::KeyDown(key));
        assert!(transition.commands.is_empty());
        state = transition.state;
    }

    Ok(())
}

#[test]
fn test_startup_from_serialized_world() -> GatewoodResult<()> {
    // A world that has round-tripped through its on-disk form behaves the
    // same as the built-in one.
    let json = serde_json::to_string(&demo::demo_file())?;
    let world = gatewood::WorldConfig::from_json(&json)?;
    let state = GameState::new(&world);
    assert_eq!(state.player, world.start);
    Ok(())
}
