//! Connectivity probe error types.

use thiserror::Error;

/// Errors raised while probing connectivity.
#[derive(Debug, Clone, Error)]
pub enum ConnectivityError {
    #[error("Probe to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("Probe to {url} failed: {message}")]
    RequestFailed { url: String, message: String },

    #[error("Probe to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid probe URL: {0}")]
    InvalidUrl(String),
}

impl ConnectivityError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConnectivityError::Timeout { .. } => "PROBE_TIMEOUT",
            ConnectivityError::RequestFailed { .. } => "PROBE_FAILED",
            ConnectivityError::HttpStatus { .. } => "PROBE_HTTP",
            ConnectivityError::InvalidUrl(_) => "PROBE_URL",
        }
    }
}

/// Classify a reqwest error from a probe request.
pub fn classify_probe_error(err: &reqwest::Error, url: &str, timeout_ms: u64) -> ConnectivityError {
    if err.is_timeout() {
        ConnectivityError::Timeout {
            url: url.to_string(),
            timeout_ms,
        }
    } else if err.is_builder() {
        ConnectivityError::InvalidUrl(url.to_string())
    } else if let Some(status) = err.status() {
        ConnectivityError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        }
    } else {
        ConnectivityError::RequestFailed {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_error_display() {
        let err = ConnectivityError::Timeout {
            url: "http://probe".to_string(),
            timeout_ms: 3000,
        };
        assert_eq!(err.to_string(), "Probe to http://probe timed out after 3000ms");
        assert_eq!(err.error_code(), "PROBE_TIMEOUT");

        let err = ConnectivityError::HttpStatus {
            url: "http://probe".to_string(),
            status: 503,
        };
        assert!(err.to_string().contains("503"));
    }
}
