//! # Cart Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Types                                      │
//! │                                                                         │
//! │  ┌─────────────────┐                 ┌─────────────────┐               │
//! │  │  CartProduct    │  add_to_cart    │    CartItem     │               │
//! │  │  ─────────────  │ ──────────────► │  ─────────────  │               │
//! │  │  id             │                 │  id             │               │
//! │  │  title          │                 │  title          │               │
//! │  │  image_url      │                 │  image_url      │               │
//! │  │  price          │                 │  price          │               │
//! │  └─────────────────┘                 │  quantity (≥1)  │               │
//! │                                      └─────────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Contract
//! Field names are serialized exactly as declared (`image_url`, not
//! `imageUrl`). Cart-seed producers write the same shape, so renaming a
//! field breaks previously persisted carts.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::MIN_ITEM_QUANTITY;

// =============================================================================
// Cart Product
// =============================================================================

/// The descriptor a view hands to `add_to_cart`: a cart line without quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartProduct {
    /// Opaque product identifier.
    pub id: String,

    /// Display name.
    pub title: String,

    /// Display image reference.
    pub image_url: String,

    /// Unit price, currency-agnostic.
    pub price: f64,
}

// =============================================================================
// Cart Item
// =============================================================================

/// One distinct product in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Opaque product identifier. Unique within a cart.
    pub id: String,

    /// Display name.
    pub title: String,

    /// Display image reference.
    pub image_url: String,

    /// Unit price, currency-agnostic.
    pub price: f64,

    /// Units in the cart. Never below [`MIN_ITEM_QUANTITY`].
    pub quantity: u32,
}

impl CartItem {
    /// Creates a cart line from a product descriptor.
    ///
    /// Quantities below the minimum are raised to it.
    pub fn from_product(product: CartProduct, quantity: u32) -> Self {
        CartItem {
            id: product.id,
            title: product.title,
            image_url: product.image_url,
            price: product.price,
            quantity: quantity.max(MIN_ITEM_QUANTITY),
        }
    }

    /// Returns the descriptor part of this line.
    pub fn product(&self) -> CartProduct {
        CartProduct {
            id: self.id.clone(),
            title: self.title.clone(),
            image_url: self.image_url.clone(),
            price: self.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shirt() -> CartProduct {
        CartProduct {
            id: "p1".to_string(),
            title: "Shirt".to_string(),
            image_url: "u".to_string(),
            price: 10.0,
        }
    }

    #[test]
    fn test_from_product_clamps_quantity() {
        let item = CartItem::from_product(shirt(), 0);
        assert_eq!(item.quantity, 1);

        let item = CartItem::from_product(shirt(), 4);
        assert_eq!(item.quantity, 4);
        assert_eq!(item.product(), shirt());
    }

    #[test]
    fn test_wire_field_names() {
        let item = CartItem::from_product(shirt(), 1);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["image_url"], "u");
        assert_eq!(json["quantity"], 1);
        assert!(json.get("imageUrl").is_none());
    }
}
