//! Integration tests for world navigation: movement boundedness, map-edge
//! continuity, and NPC-tile dialog entry, driven through the engine's event
//! entry point.

use gatewood::game::engine::{handle_event, Event};
use gatewood::world::demo;
use gatewood::{Direction, GameState, Key, Location, Position, Tile, WorldConfig};

fn world() -> WorldConfig {
    demo::world().expect("demo world should validate")
}

fn key_for(direction: Direction) -> Key {
    match direction {
        Direction::North => Key::Up,
        Direction::South => Key::Down,
        Direction::East => Key::Right,
        Direction::West => Key::Left,
    }
}

/// Sweeps every tile of every map in every direction: the resulting position
/// is always inside the bounds of whatever map the player ends up on, and a
/// blocked move leaves the position value-equal to the input.
#[test]
fn test_movement_is_bounded_everywhere() {
    let world = world();
    for (map_id, map) in &world.maps {
        for y in 0..map.height {
            for x in 0..map.width {
                for direction in Direction::all() {
                    let mut state = GameState::new(&world);
                    state.player = Location {
                        map_id: map_id.clone(),
                        position: Position::new(x, y),
                    };
                    let before = state.player.clone();
                    let candidate = before.position.step(direction);

                    let transition =
                        handle_event(&world, state, Event::KeyDown(key_for(direction)));
                    let state = transition.state;

                    let landed_on = world
                        .map(&state.player.map_id)
                        .expect("player can only be on a defined map");
                    assert!(
                        landed_on.in_bounds(state.player.position),
                        "player at ({}, {}) on '{}' moved {:?} out of bounds",
                        x,
                        y,
                        map_id,
                        direction
                    );

                    let blocked = match map.tile(candidate) {
                        Some(Tile::Obstacle) | Some(Tile::Npc { .. }) => true,
                        Some(Tile::Terrain) => false,
                        None => map.neighbor(direction).is_none(),
                    };
                    if blocked {
                        assert_eq!(
                            state.player, before,
                            "blocked move {:?} from ({}, {}) on '{}' changed the position",
                            direction, x, y, map_id
                        );
                    }
                }
            }
        }
    }
}

/// A `keydown` while navigating never opens a chat window unless the
/// destination tile is an NPC.
#[test]
fn test_dialog_opens_only_on_npc_tiles() {
    let world = world();
    for (map_id, map) in &world.maps {
        for y in 0..map.height {
            for x in 0..map.width {
                for direction in Direction::all() {
                    let mut state = GameState::new(&world);
                    state.player = Location {
                        map_id: map_id.clone(),
                        position: Position::new(x, y),
                    };
                    let candidate = state.player.position.step(direction);
                    let toward_npc = matches!(map.tile(candidate), Some(Tile::Npc { .. }));

                    let transition =
                        handle_event(&world, state, Event::KeyDown(key_for(direction)));
                    assert_eq!(
                        transition.state.in_dialog(),
                        toward_npc,
                        "moving {:?} from ({}, {}) on '{}'",
                        direction,
                        x,
                        y,
                        map_id
                    );
                }
            }
        }
    }
}

/// Crossing the town's north edge lands on the forest's south edge in the
/// same column, per the worked scenario.
#[test]
fn test_north_crossing_scenario() {
    let world = world();
    let mut state = GameState::new(&world);
    state.player = Location::new("town", 11, 0);
    let transition = handle_event(&world, state, Event::KeyDown(Key::Up));
    assert_eq!(transition.state.player, Location::new("forest", 11, 14));
    assert!(transition.commands.is_empty());
}

/// Crossing an edge and immediately crossing back returns the player to the
/// same column they left from, for every column of the shared edge.
#[test]
fn test_edge_crossing_round_trips() {
    let world = world();
    let town = world.map("town").expect("town should exist");
    for x in 0..town.width {
        let mut state = GameState::new(&world);
        state.player = Location::new("town", x, 0);
        let transition = handle_event(&world, state, Event::KeyDown(Key::Up));
        assert_eq!(transition.state.player, Location::new("forest", x, 14));

        let transition = handle_event(&world, transition.state, Event::KeyDown(Key::Down));
        assert_eq!(transition.state.player, Location::new("town", x, 0));
    }
}

/// Walking off the west edge, which has no neighbor, shows the end-of-map
/// splash and leaves the position unchanged, per the worked scenario.
#[test]
fn test_dead_edge_scenario() {
    let world = world();
    let mut state = GameState::new(&world);
    state.player = Location::new("town", 0, 7);
    let transition = handle_event(&world, state, Event::KeyDown(Key::Left));
    assert_eq!(transition.state.player, Location::new("town", 0, 7));
    assert_eq!(
        transition.state.splash_text.as_deref(),
        Some("You cannot go any further.")
    );

    // The next key press acknowledges the splash.
    let transition = handle_event(&world, transition.state, Event::KeyDown(Key::Char('x')));
    assert!(transition.state.splash_text.is_none());
}

/// Walking into the merchant opens a dialog seeded with the intro text and an
/// empty composition buffer; the player has not moved.
#[test]
fn test_npc_dialog_entry() {
    let world = world();
    let mut state = GameState::new(&world);
    state.player = Location::new("town", 4, 4);
    let transition = handle_event(&world, state, Event::KeyDown(Key::Up));

    assert_eq!(transition.state.player, Location::new("town", 4, 4));
    let window = transition
        .state
        .chat_window
        .as_ref()
        .expect("dialog should open");
    assert_eq!(window.npc_id, "merchant");
    assert_eq!(
        window.intro_text,
        "Welcome, traveler! Care to look at my wares?"
    );
    assert_eq!(window.contents.len(), 1);
    assert!(transition.commands.is_empty());
}
