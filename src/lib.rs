//! # Gatewood
//!
//! A tile-based RPG front-end driven by a deterministic event-processing core,
//! with an external AI service supplying NPC dialogue.
//!
//! ## Architecture Overview
//!
//! Gatewood separates the game into a pure core and an effectful shell:
//!
//! - **Engine**: a synchronous reducer mapping `(world, state, event)` to a new
//!   state plus a list of side-effect commands
//! - **Dialog State Machine**: chat turn lifecycle and history accumulation
//! - **World Navigation**: tile movement, map-edge crossing, NPC dialog entry
//! - **Action Resolver**: AI function calls interpreted into gated domain actions
//! - **Dispatcher**: async effect runner interpreting commands and feeding
//!   completions back in as ordinary events
//!
//! The core never performs I/O; timers and chat requests exist only as command
//! values interpreted by the dispatcher.

pub mod chat;
pub mod dispatcher;
pub mod game;
pub mod input;
pub mod world;

pub use chat::{ChatRequest, ChatResponse, ChatResult, FunctionCall, Message, Part, Role};
pub use dispatcher::Dispatcher;
pub use game::{
    // From actions
    Action,
    // From state
    ChatHistoryEntry,
    ChatWindow,
    // From engine
    Command,
    Direction,
    Event,
    GameState,
    Location,
    Position,
    Transition,
    TurnState,
};
pub use input::Key;
pub use world::{MapDef, NpcDef, Tile, WorldConfig};

/// Core error type for the Gatewood engine.
#[derive(thiserror::Error, Debug)]
pub enum GatewoodError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Static game configuration is invalid; fatal at load time
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Gatewood codebase.
pub type GatewoodResult<T> = Result<T, GatewoodError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Object id of the currency item deducted when a sale is performed
    pub const CURRENCY_OBJECT_ID: &str = "gold_coin";

    /// Delay before a gate-opening action forcibly closes the dialog
    pub const END_CHAT_ANIMATION_MS: u64 = 2000;

    /// Default inventory slot capacity when a world file does not set one
    pub const DEFAULT_MAX_SLOTS: usize = 12;
}
