//! # Error Types
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  View                         Rust                                     │
//! │  ────                         ────                                     │
//! │                                                                         │
//! │  commands::cart::add_to_cart(&scope, product)                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  No provider in scope? ─── CartError::OutsideProvider ──┐        │  │
//! │  │         │                                               │        │  │
//! │  │  Invalid descriptor?  ─── CoreError::Validation ────────┤        │  │
//! │  │         │                                               ▼        │  │
//! │  │  Success ──────────────► CartResponse          ApiError ───────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Persistence failures never reach this path: the store logs them.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use market_core::CoreError;
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Cart store and provider errors.
#[derive(Debug, Error)]
pub enum CartError {
    /// `use_cart` was called from a scope with no mounted `CartProvider`.
    ///
    /// This is a wiring bug in the view tree, not a runtime condition.
    #[error("use_cart must be used within a CartProvider")]
    OutsideProvider,

    /// The provider was unmounted; the store no longer persists or notifies.
    #[error("Cart store has been unmounted")]
    Unmounted,
}

/// Result type for cart store operations.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// API Error
// =============================================================================

/// Error returned from view commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "CONFIGURATION_ERROR",
///   "message": "use_cart must be used within a CartProvider"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// View tree is wired incorrectly (no provider)
    ConfigurationError,

    /// Input validation failed
    ValidationError,

    /// Cart store is no longer running
    CartError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        let message = err.to_string();
        match err {
            CartError::OutsideProvider => ApiError::new(ErrorCode::ConfigurationError, message),
            CartError::Unmounted => ApiError::new(ErrorCode::CartError, message),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::MalformedCart(e) => {
                tracing::error!("Malformed cart data: {}", e);
                ApiError::new(ErrorCode::Internal, "Cart data is malformed")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
