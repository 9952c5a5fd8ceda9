//! Error category classification.
//!
//! Categories give callers one place to decide whether an operation is
//! worth retrying and how to describe the failure.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Key-value or secure store failures (I/O, serialization).
    /// Usually transient; the caller may retry.
    Storage,

    /// Connectivity probe failures.
    /// Transient by nature.
    Network,

    /// Invalid or unreadable configuration.
    /// Not retryable until the configuration is corrected.
    Configuration,

    /// The app loop is gone. Recreate the app.
    Runtime,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Storage | ErrorCategory::Network)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Storage => "storage",
            ErrorCategory::Network => "network",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Runtime => "runtime",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
