//! # Cart State
//!
//! The ordered set of cart lines and the single reducer that changes it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Reducer                                         │
//! │                                                                         │
//! │  View Action              CartAction              State Change          │
//! │  ───────────              ──────────              ────────────          │
//! │                                                                         │
//! │  Tap "Add" ──────────────► Add(product) ────────► push or qty + 1      │
//! │                                                   (fields refreshed)    │
//! │                                                                         │
//! │  Tap "+" ────────────────► Increment(id) ───────► qty + 1              │
//! │                                                                         │
//! │  Tap "-" ────────────────► Decrement(id) ───────► qty - 1 (floor 1)    │
//! │                                                                         │
//! │  Storage load ───────────► Hydrate(state) ──────► replace everything   │
//! │                                                                         │
//! │  NOTE: every change goes through CartState::apply, which always sees   │
//! │        the current state. Unknown ids and invalid products are no-ops. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{CartItem, CartProduct};
use crate::validation::validate_product;
use crate::MIN_ITEM_QUANTITY;

/// A state transition for the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Adds one unit of a product, refreshing its display fields if present.
    Add(CartProduct),

    /// Adds one unit to the line with this id.
    Increment(String),

    /// Removes one unit from the line with this id, never going below one.
    Decrement(String),

    /// Replaces the whole cart (initial load from storage).
    Hydrate(CartState),
}

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same product bumps its quantity)
/// - Every quantity is at least [`MIN_ITEM_QUANTITY`]; lines are never
///   removed by decrementing
/// - Insertion order is kept; in-place updates keep their position
///
/// Serializes as a bare JSON array of [`CartItem`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartState {
    items: Vec<CartItem>,
}

impl CartState {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        CartState { items: Vec::new() }
    }

    /// Builds a cart from already-validated items.
    ///
    /// Use [`crate::codec::decode`] for untrusted input.
    pub(crate) fn from_items(items: Vec<CartItem>) -> Self {
        CartState { items }
    }

    /// Applies an action to the cart.
    ///
    /// ## Returns
    /// `true` if the cart changed, `false` for a no-op (unknown id,
    /// decrement at the floor, hydrate with identical contents, or a product
    /// that fails [`validate_product`]).
    ///
    /// Every state reachable through `apply` encodes into something
    /// [`crate::codec::decode`] accepts.
    pub fn apply(&mut self, action: CartAction) -> bool {
        match action {
            CartAction::Add(product) => {
                if validate_product(&product).is_err() {
                    return false;
                }
                self.add(product);
                true
            }
            CartAction::Increment(id) => self.update_quantity(&id, |qty| qty.saturating_add(1)),
            CartAction::Decrement(id) => {
                self.update_quantity(&id, |qty| qty.saturating_sub(1).max(MIN_ITEM_QUANTITY))
            }
            CartAction::Hydrate(state) => {
                if *self == state {
                    return false;
                }
                *self = state;
                true
            }
        }
    }

    fn add(&mut self, product: CartProduct) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == product.id) {
            let quantity = item.quantity.saturating_add(1);
            *item = CartItem::from_product(product, quantity);
            return;
        }

        self.items.push(CartItem::from_product(product, MIN_ITEM_QUANTITY));
    }

    fn update_quantity(&mut self, id: &str, f: impl FnOnce(u32) -> u32) -> bool {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return false;
        };

        let next = f(item.quantity);
        if next == item.quantity {
            return false;
        }
        item.quantity = next;
        true
    }

    /// Returns the cart lines in display order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Consumes the cart, returning its lines.
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    /// Looks up a line by product id.
    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Returns the number of distinct products.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total number of units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
