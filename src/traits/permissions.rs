//! Permission checker trait abstraction.

use async_trait::async_trait;

use crate::domain::Permission;

/// Reports which runtime permissions are still pending.
///
/// An empty list means every permission the host cares about has been
/// resolved. Implementations that cannot determine the state should
/// report the permission as pending.
#[async_trait]
pub trait PermissionChecker: Send + Sync {
    async fn pending_permissions(&self) -> Vec<Permission>;
}
