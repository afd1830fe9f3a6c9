//! # World Module
//!
//! Static game configuration: map tile grids, the neighbor graph, NPC
//! definitions, the object catalog, starting state, and UI text.
//!
//! Configuration is loaded once and validated up front. Validation failures
//! are fatal ([`GatewoodError::Config`]) and never surface as runtime game
//! transitions; the core can therefore treat every id it encounters in a
//! validated [`WorldConfig`] as resolvable.

pub mod demo;

use crate::chat::Message;
use crate::game::{Direction, Inventory, Location, Position};
use crate::{GatewoodError, GatewoodResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// One cell of a map grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tile {
    /// Open ground the player can stand on
    Terrain,
    /// Blocks movement
    Obstacle,
    /// Walkable for NPCs only; stepping toward it opens a dialog
    Npc { npc_id: String },
}

/// Adjacent map ids, one per edge. A populated entry means walking off that
/// edge relocates the player onto the far edge of the named map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub north: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub south: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub east: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub west: Option<String>,
}

impl Neighbors {
    /// Returns the neighbor map id for the given edge, if configured.
    pub fn get(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::North => self.north.as_deref(),
            Direction::South => self.south.as_deref(),
            Direction::East => self.east.as_deref(),
            Direction::West => self.west.as_deref(),
        }
    }
}

/// A validated, read-only map: rectangular tile grid plus edge adjacency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapDef {
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<Vec<Tile>>,
    pub neighbors: Neighbors,
}

impl MapDef {
    /// Checks whether a position lies inside this map's grid.
    pub fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
    }

    /// Gets the tile at a position, or `None` when out of bounds.
    pub fn tile(&self, position: Position) -> Option<&Tile> {
        if !self.in_bounds(position) {
            return None;
        }
        self.tiles
            .get(position.y as usize)
            .and_then(|row| row.get(position.x as usize))
    }

    /// Returns the neighbor map id for the given edge, if configured.
    pub fn neighbor(&self, direction: Direction) -> Option<&str> {
        self.neighbors.get(direction)
    }

    fn from_file(map_id: &str, file: &MapFile) -> GatewoodResult<Self> {
        if file.rows.is_empty() || file.rows[0].is_empty() {
            return Err(GatewoodError::Config(format!(
                "map '{}' has an empty tile grid",
                map_id
            )));
        }
        let width = file.rows[0].chars().count();
        let mut tiles = Vec::with_capacity(file.rows.len());
        for (y, row) in file.rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(GatewoodError::Config(format!(
                    "map '{}' row {} has width {} but row 0 has width {}",
                    map_id,
                    y,
                    row.chars().count(),
                    width
                )));
            }
            let mut parsed = Vec::with_capacity(width);
            for (x, ch) in row.chars().enumerate() {
                let tile = match ch {
                    '.' => Tile::Terrain,
                    '#' => Tile::Obstacle,
                    other => match file.npcs.get(&other) {
                        Some(npc_id) => Tile::Npc {
                            npc_id: npc_id.clone(),
                        },
                        None => {
                            return Err(GatewoodError::Config(format!(
                                "map '{}' has unknown tile character '{}' at ({}, {})",
                                map_id, other, x, y
                            )))
                        }
                    },
                };
                parsed.push(tile);
            }
            tiles.push(parsed);
        }
        Ok(Self {
            width: width as i32,
            height: file.rows.len() as i32,
            tiles,
            neighbors: file.neighbors.clone(),
        })
    }
}

/// A tool the model may invoke while talking for an NPC. Declarations are
/// resolved server-side from the NPC id; they are carried here so the full
/// game definition lives in one validated place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub parameters: Value,
}

/// Definition of one NPC: dialog seed text, model instructions, and tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcDef {
    /// First line shown when the dialog opens
    pub intro_text: String,
    /// System prompt applied server-side for this NPC
    pub system_prompt: String,
    #[serde(default)]
    pub tools: Vec<FunctionDeclaration>,
    /// Conversation log to seed the dialog with instead of a synthesized
    /// intro message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preseeded_history: Option<Vec<Message>>,
}

/// Catalog entry for a stackable object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDef {
    pub name: String,
}

/// Player-facing text constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiText {
    /// Splash shown when walking off an edge with no neighbor map
    pub end_of_map: String,
}

/// The two fixed anchor locations swapped between by the gate-opening action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub a: Location,
    pub b: Location,
}

/// One seeded inventory stack in a world file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSlot {
    pub object_id: String,
    pub quantity: u32,
}

fn default_max_slots() -> usize {
    crate::config::DEFAULT_MAX_SLOTS
}

/// Raw serde form of a world definition, as read from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldFile {
    pub maps: HashMap<String, MapFile>,
    pub npcs: HashMap<String, NpcDef>,
    pub objects: HashMap<String, ObjectDef>,
    pub start: Location,
    #[serde(default)]
    pub inventory: Vec<SeedSlot>,
    #[serde(default = "default_max_slots")]
    pub max_slots: usize,
    pub ui: UiText,
    pub gate: Gate,
}

/// Raw serde form of one map: tile rows plus the NPC character legend.
///
/// `.` is terrain and `#` an obstacle; any other character must appear in
/// `npcs`, which maps it to an NPC id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFile {
    pub rows: Vec<String>,
    #[serde(default)]
    pub npcs: HashMap<char, String>,
    #[serde(default)]
    pub neighbors: Neighbors,
}

/// The validated, read-only game definition injected into every core call.
///
/// Constructed through [`WorldConfig::from_file`]; a value of this type has
/// passed all referential checks.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldConfig {
    pub maps: HashMap<String, MapDef>,
    pub npcs: HashMap<String, NpcDef>,
    pub objects: HashMap<String, ObjectDef>,
    pub start: Location,
    pub starting_inventory: Inventory,
    pub ui: UiText,
    pub gate: Gate,
}

impl WorldConfig {
    /// Builds and validates a world from its raw file form.
    pub fn from_file(file: WorldFile) -> GatewoodResult<Self> {
        let mut maps = HashMap::new();
        for (map_id, map_file) in &file.maps {
            maps.insert(map_id.clone(), MapDef::from_file(map_id, map_file)?);
        }

        let mut starting_inventory = Inventory::new(file.max_slots);
        for seed in &file.inventory {
            if seed.quantity == 0 {
                return Err(GatewoodError::Config(format!(
                    "inventory seed for '{}' has zero quantity",
                    seed.object_id
                )));
            }
            starting_inventory = starting_inventory.add(&seed.object_id, seed.quantity);
        }

        let config = Self {
            maps,
            npcs: file.npcs,
            objects: file.objects,
            start: file.start,
            starting_inventory,
            ui: file.ui,
            gate: file.gate,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a world from its JSON text.
    pub fn from_json(json: &str) -> GatewoodResult<Self> {
        let file: WorldFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    /// Loads and validates a world file from disk.
    pub fn load(path: impl AsRef<Path>) -> GatewoodResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Gets a map by id.
    pub fn map(&self, map_id: &str) -> Option<&MapDef> {
        self.maps.get(map_id)
    }

    /// Gets an NPC definition by id.
    pub fn npc(&self, npc_id: &str) -> Option<&NpcDef> {
        self.npcs.get(npc_id)
    }

    /// Gets an object catalog entry by id.
    pub fn object(&self, object_id: &str) -> Option<&ObjectDef> {
        self.objects.get(object_id)
    }

    fn validate(&self) -> GatewoodResult<()> {
        for (map_id, map) in &self.maps {
            for direction in Direction::all() {
                if let Some(neighbor_id) = map.neighbor(direction) {
                    if !self.maps.contains_key(neighbor_id) {
                        return Err(GatewoodError::Config(format!(
                            "map '{}' has {:?} neighbor '{}' which is not defined",
                            map_id, direction, neighbor_id
                        )));
                    }
                }
            }
            for row in &map.tiles {
                for tile in row {
                    if let Tile::Npc { npc_id } = tile {
                        if !self.npcs.contains_key(npc_id) {
                            return Err(GatewoodError::Config(format!(
                                "map '{}' places NPC '{}' which is not defined",
                                map_id, npc_id
                            )));
                        }
                    }
                }
            }
        }

        for slot in &self.starting_inventory.slots {
            if !self.objects.contains_key(&slot.object_id) {
                return Err(GatewoodError::Config(format!(
                    "starting inventory references unknown object '{}'",
                    slot.object_id
                )));
            }
        }
        if !self.objects.contains_key(crate::config::CURRENCY_OBJECT_ID) {
            return Err(GatewoodError::Config(format!(
                "object catalog is missing the currency object '{}'",
                crate::config::CURRENCY_OBJECT_ID
            )));
        }

        self.require_terrain("starting position", &self.start)?;
        self.require_terrain("gate anchor a", &self.gate.a)?;
        self.require_terrain("gate anchor b", &self.gate.b)?;

        Ok(())
    }

    fn require_terrain(&self, what: &str, location: &Location) -> GatewoodResult<()> {
        let map = self.map(&location.map_id).ok_or_else(|| {
            GatewoodError::Config(format!(
                "{} is on undefined map '{}'",
                what, location.map_id
            ))
        })?;
        match map.tile(location.position) {
            Some(Tile::Terrain) => Ok(()),
            Some(_) => Err(GatewoodError::Config(format!(
                "{} at ({}, {}) on map '{}' is not walkable terrain",
                what, location.position.x, location.position.y, location.map_id
            ))),
            None => Err(GatewoodError::Config(format!(
                "{} at ({}, {}) is outside map '{}'",
                what, location.position.x, location.position.y, location.map_id
            ))),
        }
    }
}
