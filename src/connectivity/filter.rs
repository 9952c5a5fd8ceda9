//! Source-side duplicate suppression.

use crate::domain::ConnectivityStatus;

/// Passes a status through only when it differs from the previous one.
#[derive(Debug, Default, Clone)]
pub struct StatusFilter {
    last: Option<ConnectivityStatus>,
}

impl StatusFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Some(status)` for a genuine transition, `None` for a repeat.
    pub fn observe(&mut self, status: ConnectivityStatus) -> Option<ConnectivityStatus> {
        if self.last == Some(status) {
            return None;
        }
        self.last = Some(status);
        Some(status)
    }
}
