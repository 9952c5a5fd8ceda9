//! Fixed permission checker for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::Permission;
use crate::traits::PermissionChecker;

/// Permission checker that reports a configurable pending list.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissions {
    pending: Arc<Mutex<Vec<Permission>>>,
}

impl StaticPermissions {
    /// Nothing pending.
    pub fn none_pending() -> Self {
        Self::default()
    }

    pub fn pending(permissions: Vec<Permission>) -> Self {
        Self {
            pending: Arc::new(Mutex::new(permissions)),
        }
    }

    pub fn set_pending(&self, permissions: Vec<Permission>) {
        *self.pending.lock().unwrap() = permissions;
    }
}

#[async_trait]
impl PermissionChecker for StaticPermissions {
    async fn pending_permissions(&self) -> Vec<Permission> {
        self.pending.lock().unwrap().clone()
    }
}
