//! Raw connectivity status.

use serde::{Deserialize, Serialize};

/// Discrete status reported by a connectivity monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityStatus {
    /// A usable route to the network exists.
    Satisfied,
    /// No usable route.
    Unsatisfied,
    /// A route exists but must first be brought up (e.g. on-demand VPN).
    RequiresConnection,
}

impl ConnectivityStatus {
    /// Collapse the status into the boolean the hysteresis works on.
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectivityStatus::Satisfied)
    }
}
