//! HTTP connectivity probe.
//!
//! Issues a `GET` against a health URL. Any 2xx or 3xx answer means the
//! network is usable; a timeout, transport error, or error status means it
//! is not.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ConnectivityStatus;
use crate::error::{classify_probe_error, ConnectivityError};
use crate::traits::ConnectivityProbe;

/// Connectivity probe backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpProbeMonitor {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpProbeMonitor {
    /// Create a probe for `url` with a per-request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ConnectivityError> {
        let url = url.into();
        reqwest::Url::parse(&url).map_err(|_| ConnectivityError::InvalidUrl(url.clone()))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConnectivityError::RequestFailed {
                url: url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            url,
            timeout,
        })
    }

    /// Run one probe and report the failure, if any.
    pub async fn check(&self) -> Result<(), ConnectivityError> {
        let timeout_ms = timeout_millis(self.timeout);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| classify_probe_error(&e, &self.url, timeout_ms))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(ConnectivityError::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

/// Milliseconds for error reports, saturating instead of wrapping.
fn timeout_millis(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}

#[async_trait]
impl ConnectivityProbe for HttpProbeMonitor {
    async fn probe(&self) -> ConnectivityStatus {
        match self.check().await {
            Ok(()) => ConnectivityStatus::Satisfied,
            Err(e) => {
                debug!(error = %e, code = e.error_code(), "Connectivity probe failed");
                ConnectivityStatus::Unsatisfied
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn probe_for(server: &MockServer, timeout: Duration) -> HttpProbeMonitor {
        HttpProbeMonitor::new(format!("{}/health", server.uri()), timeout).unwrap()
    }

    #[test]
    fn test_timeout_millis_saturates() {
        assert_eq!(timeout_millis(Duration::from_millis(1500)), 1500);
        assert_eq!(timeout_millis(Duration::MAX), u64::MAX);
    }

    #[tokio::test]
    async fn test_success_is_satisfied() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let probe = probe_for(&server, Duration::from_secs(2)).await;
        assert_eq!(probe.probe().await, ConnectivityStatus::Satisfied);
    }

    #[tokio::test]
    async fn test_server_error_is_unsatisfied() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let probe = probe_for(&server, Duration::from_secs(2)).await;
        let err = probe.check().await.unwrap_err();
        assert!(matches!(err, ConnectivityError::HttpStatus { status: 503, .. }));
        assert_eq!(probe.probe().await, ConnectivityStatus::Unsatisfied);
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let probe = probe_for(&server, Duration::from_millis(50)).await;
        let err = probe.check().await.unwrap_err();
        assert_eq!(err.error_code(), "PROBE_TIMEOUT");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_unsatisfied() {
        // Nothing listens on port 9 of localhost in a test sandbox.
        let probe = HttpProbeMonitor::new("http://127.0.0.1:9/health", Duration::from_millis(500))
            .unwrap();
        assert_eq!(probe.probe().await, ConnectivityStatus::Unsatisfied);
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = HttpProbeMonitor::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert_eq!(err.error_code(), "PROBE_URL");
    }
}
