//! # Storefront Library
//!
//! Composition root for the GoMarketplace storefront cart.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (logging, one-shot runner)
//! ├── provider.rs     ◄─── ViewScope, CartProvider, use_cart
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart store and persistence worker
//! │   └── config.rs   ◄─── Configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   └── cart.rs     ◄─── Cart commands
//! └── error.rs        ◄─── CartError and ApiError
//! ```
//!
//! ## Wiring
//! ```rust,ignore
//! let scope = ViewScope::root();
//! let mut provider = CartProvider::mount(&scope, kv, CartConfig::default());
//! provider.ready().await;
//!
//! // anywhere below `scope`
//! let cart = use_cart(&scope.child())?;
//! cart.add_to_cart(product)?;
//! ```

pub mod commands;
pub mod error;
pub mod provider;
pub mod state;

use std::sync::Arc;

use market_db::KeyValueStore;
use tracing::{debug, Subscriber};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use commands::{CartCommand, CartResponse};
use error::ApiError;
use provider::{CartProvider, ViewScope};
use state::CartConfig;

pub use error::{CartError, CartResult};
pub use provider::use_cart;
pub use state::{CartHandle, StorefrontConfig};

/// Log filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info,storefront=debug,market_db=debug,sqlx=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Show trace for the storefront only
/// - Default: [`DEFAULT_LOG_FILTER`]
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    log_subscriber(filter).init();
}

fn log_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}

/// Mounts a cart over `kv`, runs one command, and unmounts.
///
/// ## Sequence
/// ```text
/// mount ──► ready (initial load) ──► command ──► unmount (pending writes flushed)
/// ```
pub async fn run_once<S>(
    kv: Arc<S>,
    config: CartConfig,
    command: CartCommand,
) -> Result<CartResponse, ApiError>
where
    S: KeyValueStore + 'static,
{
    let scope = ViewScope::root();
    let mut provider = CartProvider::mount(&scope, kv, config);
    provider.ready().await;

    debug!(?command, "Running cart command");
    let result = command.execute(&scope.child());

    provider.unmount().await;
    result
}
