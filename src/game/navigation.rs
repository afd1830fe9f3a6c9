//! # World Navigation
//!
//! Turn-based player movement: one tile per keypress, map-boundary crossing
//! through the neighbor graph, and NPC-tile dialog entry.

use crate::chat::Message;
use crate::game::state::{ChatWindow, GameState};
use crate::game::{Direction, Location, Position};
use crate::world::{MapDef, Tile, WorldConfig};

/// Moves the player one tile in the given direction.
///
/// No-op while a dialog is open. A candidate tile out of map bounds crosses
/// into the configured neighbor map for that edge, entering on the far edge
/// with the perpendicular coordinate preserved (clamped into the neighbor's
/// bounds); with no neighbor configured, the end-of-map splash is shown and
/// the position is unchanged. In bounds, terrain moves the player, an
/// obstacle blocks, and an NPC tile opens a dialog without moving.
pub fn handle_movement(world: &WorldConfig, state: &mut GameState, direction: Direction) {
    if state.in_dialog() {
        return;
    }
    let Some(map) = world.map(&state.player.map_id) else {
        return;
    };

    let candidate = state.player.position.step(direction);
    if !map.in_bounds(candidate) {
        match map.neighbor(direction) {
            Some(neighbor_id) => {
                if let Some(neighbor) = world.map(neighbor_id) {
                    state.player = Location {
                        map_id: neighbor_id.to_string(),
                        position: entry_position(neighbor, direction, candidate),
                    };
                }
            }
            None => {
                state.splash_text = Some(world.ui.end_of_map.clone());
            }
        }
        return;
    }

    match map.tile(candidate) {
        Some(Tile::Terrain) => {
            state.player.position = candidate;
        }
        Some(Tile::Npc { npc_id }) => {
            let npc_id = npc_id.clone();
            open_dialog(world, state, &npc_id);
        }
        Some(Tile::Obstacle) | None => {}
    }
}

/// The position at which a crossing in `direction` enters `destination`: the
/// far edge on the crossed axis, the preserved (clamped) coordinate on the
/// other.
fn entry_position(destination: &MapDef, direction: Direction, candidate: Position) -> Position {
    let clamped_x = candidate.x.clamp(0, destination.width - 1);
    let clamped_y = candidate.y.clamp(0, destination.height - 1);
    match direction {
        Direction::North => Position::new(clamped_x, destination.height - 1),
        Direction::South => Position::new(clamped_x, 0),
        Direction::West => Position::new(destination.width - 1, clamped_y),
        Direction::East => Position::new(0, clamped_y),
    }
}

/// Opens a chat window for the given NPC, seeded with its preseeded history
/// or a single synthesized intro message from the model.
fn open_dialog(world: &WorldConfig, state: &mut GameState, npc_id: &str) {
    let Some(npc) = world.npc(npc_id) else {
        return;
    };
    let seed = npc
        .preseeded_history
        .clone()
        .unwrap_or_else(|| vec![Message::model_text(&npc.intro_text)]);
    state.chat_window = Some(ChatWindow::open(npc_id, &npc.intro_text, seed));
}
