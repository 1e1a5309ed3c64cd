//! # Configuration State
//!
//! Stores storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. CLI flags (see `main.rs`)
//! 2. Environment variables (`MARKET_*`)
//! 3. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use directories::ProjectDirs;
use market_core::{LEGACY_PRODUCT_STORAGE_KEY, PRODUCTS_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartConfig {
    /// Key the cart is loaded from and persisted to.
    pub storage_key: String,

    /// Key checked when `storage_key` is empty, to recover carts written by
    /// older builds. `None` disables recovery.
    pub legacy_key: Option<String>,
}

impl Default for CartConfig {
    fn default() -> Self {
        CartConfig {
            storage_key: PRODUCTS_STORAGE_KEY.to_string(),
            legacy_key: Some(LEGACY_PRODUCT_STORAGE_KEY.to_string()),
        }
    }
}

impl CartConfig {
    /// Sets the storage key.
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Disables legacy-key recovery.
    pub fn without_legacy_recovery(mut self) -> Self {
        self.legacy_key = None;
        self
    }
}

/// Storefront configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    /// SQLite database file.
    pub database_path: PathBuf,

    /// Cart store settings.
    pub cart: CartConfig,
}

impl Default for StorefrontConfig {
    /// Development defaults: `./gomarketplace_dev.db`, products key,
    /// legacy recovery on.
    fn default() -> Self {
        StorefrontConfig {
            database_path: PathBuf::from("./gomarketplace_dev.db"),
            cart: CartConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Creates a StorefrontConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `MARKET_DB_PATH`: database file (default: platform data dir)
    /// - `MARKET_CART_KEY`: storage key for the cart
    /// - `MARKET_RECOVER_LEGACY_CART`: `true`/`false` (default `true`)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = StorefrontConfig {
            database_path: default_database_path(),
            ..StorefrontConfig::default()
        };

        if let Some(path) = lookup("MARKET_DB_PATH") {
            config.database_path = PathBuf::from(path);
        }

        if let Some(key) = lookup("MARKET_CART_KEY").filter(|k| !k.trim().is_empty()) {
            config.cart.storage_key = key;
        }

        if let Some(flag) = lookup("MARKET_RECOVER_LEGACY_CART") {
            match flag.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => {}
                "false" | "0" | "no" => config.cart.legacy_key = None,
                other => warn!(value = %other, "Ignoring invalid MARKET_RECOVER_LEGACY_CART"),
            }
        }

        config
    }
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/dev.gomarketplace.storefront/gomarketplace.db`
/// - **Windows**: `%APPDATA%\gomarketplace\storefront\data\gomarketplace.db`
/// - **Linux**: `~/.local/share/storefront/gomarketplace.db`
///
/// Falls back to the development default when no home directory exists.
fn default_database_path() -> PathBuf {
    match ProjectDirs::from("dev", "gomarketplace", "storefront") {
        Some(dirs) => dirs.data_dir().join("gomarketplace.db"),
        None => StorefrontConfig::default().database_path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&[]));

        assert_eq!(config.cart.storage_key, "@gomarketplace:products");
        assert_eq!(
            config.cart.legacy_key.as_deref(),
            Some("@gomarketplace:product")
        );
        assert!(config.database_path.ends_with("gomarketplace.db")
            || config.database_path.ends_with("gomarketplace_dev.db"));
    }

    #[test]
    fn test_env_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("MARKET_DB_PATH", "/tmp/cart.db"),
            ("MARKET_CART_KEY", "@tests:cart"),
            ("MARKET_RECOVER_LEGACY_CART", "false"),
        ]));

        assert_eq!(config.database_path, PathBuf::from("/tmp/cart.db"));
        assert_eq!(config.cart.storage_key, "@tests:cart");
        assert_eq!(config.cart.legacy_key, None);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("MARKET_CART_KEY", "   "),
            ("MARKET_RECOVER_LEGACY_CART", "sometimes"),
        ]));

        assert_eq!(config.cart, CartConfig::default());
    }
}
