//! # Inventory Ledger
//!
//! Pure mapping-based add/remove of stackable items. Every operation returns a
//! new inventory value, leaving the input untouched; the engine replaces game
//! state wholesale per event and never mutates a committed value in place.

use serde::{Deserialize, Serialize};

/// One stack of a single object kind.
///
/// Invariant: `quantity` is always greater than zero; a stack that would reach
/// zero is deleted from the inventory instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Catalog id of the stacked object
    pub object_id: String,
    /// Number of copies held
    pub quantity: u32,
}

/// An ordered list of item stacks with a slot capacity.
///
/// Invariants: no two slots share an `object_id`, slot order is preserved
/// across operations, and no slot has zero quantity. The `max_slots` capacity
/// is carried but not enforced by the ledger itself; enforcement belongs to
/// callers that decide whether an acquisition is allowed at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub slots: Vec<Slot>,
    pub max_slots: usize,
}

impl Inventory {
    /// Creates an empty inventory with the given slot capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use gatewood::game::Inventory;
    ///
    /// let inventory = Inventory::new(12);
    /// assert!(inventory.slots.is_empty());
    /// assert_eq!(inventory.quantity("rope"), 0);
    /// ```
    pub fn new(max_slots: usize) -> Self {
        Self {
            slots: Vec::new(),
            max_slots,
        }
    }

    /// Returns a new inventory with `quantity` copies of `object_id` added.
    ///
    /// An existing stack is incremented in place (order preserved); otherwise a
    /// new stack is appended. Adding zero is a no-op.
    pub fn add(&self, object_id: &str, quantity: u32) -> Inventory {
        if quantity == 0 {
            return self.clone();
        }
        let mut next = self.clone();
        match next
            .slots
            .iter_mut()
            .find(|slot| slot.object_id == object_id)
        {
            Some(slot) => slot.quantity = slot.quantity.saturating_add(quantity),
            None => next.slots.push(Slot {
                object_id: object_id.to_string(),
                quantity,
            }),
        }
        next
    }

    /// Returns a new inventory with `quantity` copies of `object_id` removed.
    ///
    /// A stack decremented to zero or below is deleted entirely; removal of an
    /// absent object id is a no-op. Removal never produces a negative
    /// quantity: over-removal clamps through stack deletion.
    pub fn remove(&self, object_id: &str, quantity: u32) -> Inventory {
        if quantity == 0 {
            return self.clone();
        }
        let mut next = self.clone();
        if let Some(index) = next
            .slots
            .iter()
            .position(|slot| slot.object_id == object_id)
        {
            let remaining = next.slots[index].quantity.saturating_sub(quantity);
            if remaining == 0 {
                next.slots.remove(index);
            } else {
                next.slots[index].quantity = remaining;
            }
        }
        next
    }

    /// Returns the held quantity of `object_id`, or zero if absent.
    pub fn quantity(&self, object_id: &str) -> u32 {
        self.slots
            .iter()
            .find(|slot| slot.object_id == object_id)
            .map(|slot| slot.quantity)
            .unwrap_or(0)
    }
}
