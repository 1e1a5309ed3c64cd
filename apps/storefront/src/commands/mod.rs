//! # Commands Module
//!
//! Functions views call to read and change the cart.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! └── cart.rs     ◄─── Cart reads and mutations
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  View                                                                   │
//! │  ────                                                                   │
//! │  commands::cart::increment(&scope, "p1")                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  use_cart(&scope) ──► CartHandle   (or ApiError CONFIGURATION_ERROR)    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  handle.increment("p1")                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  CartResponse { items, totals }   (JSON-serializable)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;

pub use cart::{CartCommand, CartResponse, CartTotals};
