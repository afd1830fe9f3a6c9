//! # Demo World
//!
//! The built-in town/forest world used by the binary when no world file is
//! given, and by the test suite as a known-good fixture.
//!
//! The town square holds a merchant who can sell goods; the forest holds the
//! gate warden who can open the old gate between the two maps. Walking off
//! the town's north edge crosses into the forest and vice versa.

use super::{
    FunctionDeclaration, Gate, MapFile, Neighbors, NpcDef, ObjectDef, SeedSlot, UiText, WorldFile,
};
use crate::game::Location;
use crate::{GatewoodResult, WorldConfig};
use serde_json::json;
use std::collections::HashMap;

/// Builds the raw demo world file.
pub fn demo_file() -> WorldFile {
    let town = MapFile {
        rows: vec![
            "............".to_string(),
            "..####......".to_string(),
            "..#....#....".to_string(),
            "..#.m..#....".to_string(),
            "..#....#....".to_string(),
            "..####.#....".to_string(),
            "........#...".to_string(),
            "............".to_string(),
            "...#...#....".to_string(),
            "............".to_string(),
        ],
        npcs: HashMap::from([('m', "merchant".to_string())]),
        neighbors: Neighbors {
            north: Some("forest".to_string()),
            ..Neighbors::default()
        },
    };

    let forest = MapFile {
        rows: vec![
            "............".to_string(),
            "..#..#......".to_string(),
            "............".to_string(),
            "....#...#...".to_string(),
            "............".to_string(),
            "......#.....".to_string(),
            "............".to_string(),
            "......w.....".to_string(),
            "............".to_string(),
            "..#.........".to_string(),
            "............".to_string(),
            "........#...".to_string(),
            "............".to_string(),
            "............".to_string(),
            "............".to_string(),
        ],
        npcs: HashMap::from([('w', "warden".to_string())]),
        neighbors: Neighbors {
            south: Some("town".to_string()),
            ..Neighbors::default()
        },
    };

    let merchant = NpcDef {
        intro_text: "Welcome, traveler! Care to look at my wares?".to_string(),
        system_prompt: "You are a cheerful market merchant in the town of Gatewood. \
                        You sell rope and lanterns. When the player agrees to buy \
                        something, call sell_item with the object id and price."
            .to_string(),
        tools: vec![FunctionDeclaration {
            name: "sell_item".to_string(),
            description: "Sell one object to the player at the given price in gold coins."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "object_id": {"type": "string"},
                    "price": {"type": "integer"}
                },
                "required": ["object_id", "price"]
            }),
        }],
        preseeded_history: None,
    };

    let warden = NpcDef {
        intro_text: "Halt. The old gate stays shut unless you give me a reason.".to_string(),
        system_prompt: "You are the taciturn warden of the forest gate. If the player \
                        convinces you to let them through, call open_door."
            .to_string(),
        tools: vec![FunctionDeclaration {
            name: "open_door".to_string(),
            description: "Open the gate between the town and the forest.".to_string(),
            parameters: json!({"type": "object", "properties": {}}),
        }],
        preseeded_history: Some(vec![
            crate::chat::Message::model_text(
                "Halt. The old gate stays shut unless you give me a reason.",
            ),
            crate::chat::Message::user_text("Who are you?"),
            crate::chat::Message::model_text("The warden. That is all you need to know."),
        ]),
    };

    WorldFile {
        maps: HashMap::from([("town".to_string(), town), ("forest".to_string(), forest)]),
        npcs: HashMap::from([
            ("merchant".to_string(), merchant),
            ("warden".to_string(), warden),
        ]),
        objects: HashMap::from([
            (
                "gold_coin".to_string(),
                ObjectDef {
                    name: "Gold coin".to_string(),
                },
            ),
            (
                "rope".to_string(),
                ObjectDef {
                    name: "Coil of rope".to_string(),
                },
            ),
            (
                "lantern".to_string(),
                ObjectDef {
                    name: "Oil lantern".to_string(),
                },
            ),
        ]),
        start: Location::new("town", 5, 7),
        inventory: vec![SeedSlot {
            object_id: "gold_coin".to_string(),
            quantity: 30,
        }],
        max_slots: crate::config::DEFAULT_MAX_SLOTS,
        ui: UiText {
            end_of_map: "You cannot go any further.".to_string(),
        },
        gate: Gate {
            a: Location::new("town", 1, 9),
            b: Location::new("forest", 6, 13),
        },
    }
}

/// Builds and validates the demo world.
pub fn world() -> GatewoodResult<WorldConfig> {
    WorldConfig::from_file(demo_file())
}
