//! Store-related error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the key-value and secure stores.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Failed to read {key}: {message}")]
    ReadFailed { key: String, message: String },

    #[error("Failed to write {key}: {message}")]
    WriteFailed { key: String, message: String },

    #[error("Failed to clear user data: {0}")]
    ClearFailed(String),

    #[error("Value for {key} has the wrong type")]
    TypeMismatch { key: String },

    #[error("Could not determine data directory")]
    NoDataDirectory,

    #[error("IO error at {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::ReadFailed { .. } => "STORE_READ",
            StoreError::WriteFailed { .. } => "STORE_WRITE",
            StoreError::ClearFailed(_) => "STORE_CLEAR",
            StoreError::TypeMismatch { .. } => "STORE_TYPE",
            StoreError::NoDataDirectory => "STORE_NO_DIR",
            StoreError::Io { .. } => "STORE_IO",
            StoreError::Serialization(_) => "STORE_SERDE",
        }
    }

    /// Whether a retry may succeed without changing anything.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::ReadFailed { .. }
                | StoreError::WriteFailed { .. }
                | StoreError::ClearFailed(_)
                | StoreError::Io { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
