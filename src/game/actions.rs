//! # Action Resolver
//!
//! Interprets an AI-issued function call into a typed domain action, decides
//! whether it needs player confirmation, and executes it against game state.
//!
//! Actions arrive as opaque `{name, args}` payloads. Anything that does not
//! parse into a known action is treated as unrecognized and yields no action;
//! the dialog handler abandons the conversation in that case.

use crate::chat::FunctionCall;
use crate::game::state::GameState;
use crate::world::WorldConfig;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A domain-level effect requested by the model on an NPC's behalf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Teleport the player through the gate between the two anchor maps
    OpenDoor,
    /// Sell one object to the player, deducting its price in currency
    SellItem { object_id: String, price: u32 },
}

impl Action {
    /// The wire name of the function this action was parsed from, used when
    /// acknowledging the call back to the model.
    pub fn function_name(&self) -> &'static str {
        match self {
            Action::OpenDoor => "open_door",
            Action::SellItem { .. } => "sell_item",
        }
    }

    /// Whether resolving this action ends the conversation. Opening the gate
    /// always does; a sale keeps the dialog going.
    pub fn exits_dialog(&self) -> bool {
        matches!(self, Action::OpenDoor)
    }
}

/// Maps a function call to a typed action.
///
/// Unknown function names yield `None`. A known name with missing or
/// mistyped arguments also yields `None`; the caller treats both the same
/// way, as an unrecognized call.
pub fn parse_function_call(call: &FunctionCall) -> Option<Action> {
    match call.name.as_str() {
        "open_door" => Some(Action::OpenDoor),
        "sell_item" => {
            let object_id = call.args.get("object_id")?.as_str()?.to_string();
            let price = u32::try_from(call.args.get("price")?.as_u64()?).ok()?;
            Some(Action::SellItem { object_id, price })
        }
        _ => None,
    }
}

/// Whether an action must be confirmed by the player before it executes.
///
/// Opening the gate never needs confirmation. A sale always does under the
/// default policy; there is no auto-accept threshold configured, and balance
/// problems are surfaced through the confirmation exchange rather than
/// blocking it.
pub fn needs_confirmation(action: &Action) -> bool {
    match action {
        Action::OpenDoor => false,
        Action::SellItem { .. } => true,
    }
}

/// Executes an action against game state, returning the function-response
/// payload describing the outcome for the next chat request.
///
/// A sale adds the sold object and deducts the price in currency with no
/// balance precheck; a deduction past zero deletes the currency stack
/// entirely (see `Inventory::remove`).
pub fn perform(world: &WorldConfig, state: &mut GameState, action: &Action) -> Value {
    match action {
        Action::OpenDoor => {
            let gate = &world.gate;
            state.player = if state.player.map_id == gate.a.map_id {
                gate.b.clone()
            } else {
                gate.a.clone()
            };
            json!({"result": "accept"})
        }
        Action::SellItem { object_id, price } => {
            state.inventory = state
                .inventory
                .add(object_id, 1)
                .remove(crate::config::CURRENCY_OBJECT_ID, *price);
            json!({"result": "accept"})
        }
    }
}

/// The function-response payload for a rejected action.
pub fn rejection() -> Value {
    json!({"result": "reject"})
}
