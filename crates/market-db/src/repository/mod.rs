//! # Repository Module
//!
//! Repositories wrap the connection pool and expose typed operations.
//!
//! ## Repositories
//! - [`kv::KvRepository`] - SQLite-backed [`crate::KeyValueStore`]
//!
//! ## Usage
//! ```rust,ignore
//! let db = Database::new(config).await?;
//! let value = db.kv().get("@gomarketplace:products").await?;
//! ```

pub mod kv;
