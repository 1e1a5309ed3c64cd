//! # State Module
//!
//! Manages storefront state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      CartProvider                               │   │
//! │  │  CartStore::start(kv, cart_config)                              │   │
//! │  │  scope.manage(store.handle())                                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │                 ┌────────────┴────────────┐                             │
//! │                 ▼                         ▼                             │
//! │  ┌──────────────────────────┐  ┌──────────────────────────┐            │
//! │  │   CartHandle             │  │   StorefrontConfig       │            │
//! │  │                          │  │                          │            │
//! │  │  watch<cart>             │  │  database_path           │            │
//! │  │  mpsc → persist worker   │  │  storage_key             │            │
//! │  └──────────────────────────┘  └──────────────────────────┘            │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartHandle: mutations serialize on the watch channel's lock         │
//! │  • StorefrontConfig: read-only after initialization                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::{CartHandle, CartStore, CartSubscription};
pub use config::{CartConfig, StorefrontConfig};
