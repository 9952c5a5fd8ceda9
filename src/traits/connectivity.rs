//! Connectivity probe trait abstraction.

use async_trait::async_trait;

use crate::domain::ConnectivityStatus;

/// A single connectivity check.
///
/// The monitor loop in [`crate::connectivity::spawn_monitor`] calls this
/// periodically and forwards only genuine status transitions.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn probe(&self) -> ConnectivityStatus;
}
