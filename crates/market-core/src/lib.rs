//! # market-core: Pure Cart Logic for GoMarketplace
//!
//! This crate is the **heart** of the storefront cart. It contains the cart
//! data model and every state transition as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      GoMarketplace Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront views                             │   │
//! │  │    Dashboard ──► Product card ──► Cart screen                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ use_cart(&scope)                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             Cart store (apps/storefront)                        │   │
//! │  │    add_to_cart, increment, decrement, products                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ market-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   cart    │  │   codec   │  │ validation│  │   │
//! │  │   │ CartItem  │  │ CartState │  │  encode   │  │   rules   │  │   │
//! │  │   │CartProduct│  │CartAction │  │  decode   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               market-db (Durable key-value store)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Cart item types
//! - [`cart`] - Cart state and its reducer
//! - [`codec`] - Persisted cart format
//! - [`error`] - Domain error types
//! - [`validation`] - Schema checks for persisted and incoming data
//!
//! ## Example Usage
//!
//! ```rust
//! use market_core::{CartAction, CartProduct, CartState};
//!
//! let mut cart = CartState::new();
//! cart.apply(CartAction::Add(CartProduct {
//!     id: "p1".to_string(),
//!     title: "Shirt".to_string(),
//!     image_url: "u".to_string(),
//!     price: 10.0,
//! }));
//! cart.apply(CartAction::Increment("p1".to_string()));
//!
//! assert_eq!(cart.get("p1").map(|item| item.quantity), Some(2));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod codec;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartAction, CartState};
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::{CartItem, CartProduct};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart is read from and written to.
pub const PRODUCTS_STORAGE_KEY: &str = "@gomarketplace:products";

/// Storage key older builds wrote from their add-to-cart path.
///
/// ## Why keep it?
/// Those builds persisted the add path under this key while every other path
/// used [`PRODUCTS_STORAGE_KEY`]. The store only ever reads it, to recover
/// carts that were never written under the products key.
pub const LEGACY_PRODUCT_STORAGE_KEY: &str = "@gomarketplace:product";

/// Smallest quantity a cart line can hold. Decrement clamps here.
pub const MIN_ITEM_QUANTITY: u32 = 1;
