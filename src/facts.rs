//! Fact source: reads [`AuthFacts`] from the external stores.
//!
//! Every read that fails is logged and treated as the fact being absent,
//! so a snapshot can always be produced. The mutations the state manager
//! performs (launch marker, logged-out sentinel, permission flag, logout
//! wipe) also live here so the store keys stay in one place.

use std::sync::Arc;

use tracing::warn;

use crate::domain::{AuthFacts, Permission, SecureProfile};
use crate::error::StoreError;
use crate::traits::{KeyValueStore, PermissionChecker, SecureStore};

/// Store key for the first-launch marker.
pub const HAS_LAUNCHED_KEY: &str = "has_launched";

/// Store key for the logged-out sentinel.
pub const LOGGED_OUT_KEY: &str = "is_logged_out";

/// Store key for the permission-completed flag.
pub const PERMISSION_COMPLETED_KEY: &str = "permission_setup_completed";

/// Composes the external stores into fact snapshots.
#[derive(Clone)]
pub struct FactSource {
    store: Arc<dyn KeyValueStore>,
    secure: Arc<dyn SecureStore>,
    permissions: Arc<dyn PermissionChecker>,
}

impl FactSource {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        secure: Arc<dyn SecureStore>,
        permissions: Arc<dyn PermissionChecker>,
    ) -> Self {
        Self {
            store,
            secure,
            permissions,
        }
    }

    /// Read a fresh snapshot of all five facts.
    pub async fn snapshot(&self) -> AuthFacts {
        let profile = self.profile().await;
        AuthFacts {
            has_token: profile.as_ref().is_some_and(SecureProfile::has_token),
            is_fresh_install: self.is_first_launch().await,
            is_logged_out: self.read_flag(LOGGED_OUT_KEY).await,
            is_profile_pending: profile.is_some_and(|p| p.requires_profile_completion),
            is_permission_completed: self.is_permission_completed().await,
        }
    }

    /// True until [`FactSource::mark_launched`] has succeeded once.
    ///
    /// An unreadable marker counts as "never launched".
    pub async fn is_first_launch(&self) -> bool {
        !self.read_flag(HAS_LAUNCHED_KEY).await
    }

    /// The stored profile, or `None` if absent or unreadable.
    pub async fn profile(&self) -> Option<SecureProfile> {
        match self.secure.load_profile().await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "Secure store read failed; treating token as absent");
                None
            }
        }
    }

    /// Permissions the host still has to request.
    pub async fn pending_permissions(&self) -> Vec<Permission> {
        self.permissions.pending_permissions().await
    }

    /// Permission setup was marked complete and nothing is still pending.
    pub async fn is_permission_completed(&self) -> bool {
        self.read_flag(PERMISSION_COMPLETED_KEY).await && self.pending_permissions().await.is_empty()
    }

    pub async fn mark_launched(&self) -> Result<(), StoreError> {
        self.store.set_bool(HAS_LAUNCHED_KEY, true).await
    }

    pub async fn set_logged_out(&self, logged_out: bool) -> Result<(), StoreError> {
        self.store.set_bool(LOGGED_OUT_KEY, logged_out).await
    }

    /// Drop the sentinel so a later sign-in on this install is not
    /// mistaken for a leftover session.
    pub async fn clear_logged_out(&self) -> Result<(), StoreError> {
        self.store.remove(LOGGED_OUT_KEY).await
    }

    pub async fn set_permission_completed(&self, completed: bool) -> Result<(), StoreError> {
        if completed {
            self.store.set_bool(PERMISSION_COMPLETED_KEY, true).await
        } else {
            self.store.remove(PERMISSION_COMPLETED_KEY).await
        }
    }

    /// Wipe everything the secure store holds for the current user.
    pub async fn clear_user_data(&self) -> Result<(), StoreError> {
        self.secure.clear_all().await
    }

    async fn read_flag(&self, key: &str) -> bool {
        match self.store.get_bool(key).await {
            Ok(value) => value.unwrap_or(false),
            Err(e) => {
                warn!(key, error = %e, "Fact read failed; treating as absent");
                false
            }
        }
    }
}

impl std::fmt::Debug for FactSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactSource").finish_non_exhaustive()
    }
}
