//! Error handling for waypoint.
//!
//! - **Error Categories**: High-level classification for retry decisions
//! - **Domain-specific Errors**: [`StoreError`] and [`ConnectivityError`]
//! - **Unified Error Type**: [`WaypointError`] consolidates both
//! - **Result Type Alias**: [`WaypointResult<T>`]
//!
//! None of these errors reach the evaluator. Fact reads that fail are
//! logged and read as "absent"; logout failures surface as a `false`
//! completion flag. The types exist for adapters and for hosts that call
//! the stores directly.
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Storage | Key-value / secure store | Yes |
//! | Network | Connectivity probe | Yes |
//! | Configuration | Bad config values | No |
//! | Runtime | App loop stopped | No |

mod category;
mod network;
mod store;

pub use category::ErrorCategory;
pub use network::{classify_probe_error, ConnectivityError};
pub use store::StoreError;

use thiserror::Error;

/// Unified error type.
#[derive(Debug, Clone, Error)]
pub enum WaypointError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Connectivity(#[from] ConnectivityError),

    #[error("Invalid configuration for {key}: {message}")]
    Config { key: String, message: String },

    /// The app loop has exited and no longer accepts messages.
    #[error("App loop has stopped")]
    LoopStopped,
}

/// Type alias for Results using [`WaypointError`].
pub type WaypointResult<T> = Result<T, WaypointError>;

impl WaypointError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            WaypointError::Store(_) => ErrorCategory::Storage,
            WaypointError::Connectivity(_) => ErrorCategory::Network,
            WaypointError::Config { .. } => ErrorCategory::Configuration,
            WaypointError::LoopStopped => ErrorCategory::Runtime,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            WaypointError::Store(err) => err.is_transient(),
            WaypointError::Connectivity(_) => true,
            WaypointError::Config { .. } | WaypointError::LoopStopped => false,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            WaypointError::Store(err) => err.error_code(),
            WaypointError::Connectivity(err) => err.error_code(),
            WaypointError::Config { .. } => "CONFIG_INVALID",
            WaypointError::LoopStopped => "LOOP_STOPPED",
        }
    }
}
