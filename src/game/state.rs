//! # Game State Module
//!
//! The root state aggregate and the dialog-mode payload types.
//!
//! `GameState` is a plain value: the engine consumes a complete snapshot per
//! event and returns a complete replacement. Nothing in this module performs
//! I/O or holds references into external systems.

use crate::chat::{Message, Part};
use crate::game::actions::Action;
use crate::game::inventory::Inventory;
use crate::game::Position;
use crate::world::WorldConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A player location: one position on one map in the map graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub map_id: String,
    pub position: Position,
}

impl Location {
    /// Creates a location from a map id and coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use gatewood::Location;
    ///
    /// let start = Location::new("town", 5, 7);
    /// assert_eq!(start.map_id, "town");
    /// assert_eq!(start.position.x, 5);
    /// ```
    pub fn new(map_id: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            map_id: map_id.into(),
            position: Position::new(x, y),
        }
    }
}

/// Whose turn it is within a dialog, and what input is currently accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TurnState {
    /// The player is composing a message
    UserTurn { current_message: String },
    /// A chat request is in flight; only Escape is accepted
    WaitingForAi,
    /// The model requested a gated action; awaiting y/n
    ConfirmingAction { pending: Action },
    /// A terminal action resolved; a fixed delay runs before the dialog closes
    AnimatingBeforeEndChat,
}

impl TurnState {
    /// The initial turn state on entering a dialog: composing, empty message.
    pub fn user_turn() -> Self {
        TurnState::UserTurn {
            current_message: String::new(),
        }
    }
}

/// One display-log entry: either a line of text or an action outcome.
///
/// The display log is derived from the conversation contents plus action
/// outcomes. Both logs are append-only and never rewritten retroactively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChatHistoryEntry {
    Text {
        role: crate::chat::Role,
        content: String,
    },
    Action {
        action: Action,
        accepted: bool,
    },
}

/// The dialog-mode payload of [`GameState`]; `None` means the player is
/// navigating the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatWindow {
    /// Which NPC the player is talking to
    pub npc_id: String,
    /// The NPC's opening line
    pub intro_text: String,
    /// The exact conversation log sent to the AI service on each request
    pub contents: Vec<Message>,
    /// Display-oriented log of text lines and action outcomes
    pub history: Vec<ChatHistoryEntry>,
    /// Dialog sub-state machine
    pub turn: TurnState,
}

impl ChatWindow {
    /// Opens a dialog seeded with the given conversation log. The display log
    /// is reconstructed from the seed's text parts.
    pub fn open(npc_id: impl Into<String>, intro_text: impl Into<String>, seed: Vec<Message>) -> Self {
        let mut window = Self {
            npc_id: npc_id.into(),
            intro_text: intro_text.into(),
            contents: Vec::new(),
            history: Vec::new(),
            turn: TurnState::user_turn(),
        };
        for message in seed {
            window.append_message(message);
        }
        window
    }

    /// Appends a message to the conversation log, mirroring its text parts
    /// into the display log.
    pub fn append_message(&mut self, message: Message) {
        for part in &message.parts {
            if let Part::Text(text) = part {
                self.history.push(ChatHistoryEntry::Text {
                    role: message.role,
                    content: text.clone(),
                });
            }
        }
        self.contents.push(message);
    }

    /// Appends a function-response message to the conversation log and the
    /// matching action entry to the display log.
    pub fn append_function_response(
        &mut self,
        name: &str,
        response: Value,
        action: Action,
        accepted: bool,
    ) {
        self.contents.push(Message::function_response(name, response));
        self.history.push(ChatHistoryEntry::Action { action, accepted });
    }
}

/// Central game state: the root aggregate replaced wholesale per event.
///
/// Exactly one of navigating (`chat_window == None`) and in-dialog
/// (`chat_window == Some`) holds at any time; this is the top-level
/// state-machine discriminant the engine dispatches on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Player location; mutated only by navigation and the gate action
    pub player: Location,
    /// Dialog payload, or `None` while navigating
    pub chat_window: Option<ChatWindow>,
    /// Stackable item ledger
    pub inventory: Inventory,
    /// Ephemeral dismissible overlay text
    pub splash_text: Option<String>,
}

impl GameState {
    /// Creates the session-start state from a validated world configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use gatewood::world::demo;
    /// use gatewood::GameState;
    ///
    /// let world = demo::world().unwrap();
    /// let state = GameState::new(&world);
    /// assert!(state.chat_window.is_none());
    /// assert!(state.splash_text.is_none());
    /// ```
    pub fn new(world: &WorldConfig) -> Self {
        Self {
            player: world.start.clone(),
            chat_window: None,
            inventory: world.starting_inventory.clone(),
            splash_text: None,
        }
    }

    /// Whether the player is currently in a dialog.
    pub fn in_dialog(&self) -> bool {
        self.chat_window.is_some()
    }
}
