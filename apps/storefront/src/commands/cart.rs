//! # Cart Commands
//!
//! View-facing cart operations.
//!
//! Every command resolves the cart through [`use_cart`], so calling one
//! from a scope without a provider is reported as a configuration error.

use market_core::{CartItem, CartProduct, CartState};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::provider::{use_cart, ViewScope};
use crate::state::CartHandle;

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

/// Summary numbers for the cart badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct products in the cart
    pub item_count: usize,

    /// Sum of all quantities
    pub total_quantity: u64,
}

impl From<&CartState> for CartResponse {
    fn from(cart: &CartState) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: CartTotals {
                item_count: cart.item_count(),
                total_quantity: cart.total_quantity(),
            },
        }
    }
}

impl From<&CartHandle> for CartResponse {
    fn from(handle: &CartHandle) -> Self {
        CartResponse::from(&handle.snapshot())
    }
}

/// Gets the current cart contents.
///
/// ## Returns
/// Current cart with items and totals
pub fn get_cart(scope: &ViewScope) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");
    let cart = use_cart(scope)?;
    Ok(CartResponse::from(&cart))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases by one and the title,
///   image and price are refreshed
/// - If product not in cart: appended with quantity 1
///
/// ## Errors
/// - `CONFIGURATION_ERROR` outside a provider
/// - `VALIDATION_ERROR` for a blank id or title, or a bad price
pub fn add_to_cart(scope: &ViewScope, product: CartProduct) -> Result<CartResponse, ApiError> {
    debug!(id = %product.id, "add_to_cart command");
    let cart = use_cart(scope)?;
    cart.add_to_cart(product)?;
    Ok(CartResponse::from(&cart))
}

/// Increases an item's quantity by one. Unknown ids leave the cart as is.
pub fn increment(scope: &ViewScope, id: &str) -> Result<CartResponse, ApiError> {
    debug!(id = %id, "increment command");
    let cart = use_cart(scope)?;
    cart.increment(id);
    Ok(CartResponse::from(&cart))
}

/// Decreases an item's quantity by one, stopping at one. Unknown ids leave
/// the cart as is.
pub fn decrement(scope: &ViewScope, id: &str) -> Result<CartResponse, ApiError> {
    debug!(id = %id, "decrement command");
    let cart = use_cart(scope)?;
    cart.decrement(id);
    Ok(CartResponse::from(&cart))
}

/// A single cart command, as issued from the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    List,
    Add(CartProduct),
    Increment(String),
    Decrement(String),
}

impl CartCommand {
    /// Runs the command against the cart provided to `scope`.
    pub fn execute(self, scope: &ViewScope) -> Result<CartResponse, ApiError> {
        match self {
            CartCommand::List => get_cart(scope),
            CartCommand::Add(product) => add_to_cart(scope, product),
            CartCommand::Increment(id) => increment(scope, &id),
            CartCommand::Decrement(id) => decrement(scope, &id),
        }
    }
}
