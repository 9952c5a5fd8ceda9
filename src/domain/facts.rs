//! Auth fact snapshot.

use serde::{Deserialize, Serialize};

/// Snapshot of the persisted facts that decide the top-level screen.
///
/// A snapshot has no identity. It is read fresh from the external stores
/// on every evaluation and dropped afterwards; nothing caches it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthFacts {
    /// An access token is present in the secure store.
    pub has_token: bool,
    /// The app has never been marked as launched on this install.
    pub is_fresh_install: bool,
    /// The persisted "logged out" sentinel is set.
    pub is_logged_out: bool,
    /// The stored profile still requires completion.
    pub is_profile_pending: bool,
    /// Permission setup was marked complete and nothing is still pending.
    pub is_permission_completed: bool,
}

impl AuthFacts {
    /// Create an empty snapshot (no token, not fresh, nothing pending).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the token fact.
    pub fn with_token(mut self, has_token: bool) -> Self {
        self.has_token = has_token;
        self
    }

    /// Set the fresh-install fact.
    pub fn with_fresh_install(mut self, fresh: bool) -> Self {
        self.is_fresh_install = fresh;
        self
    }

    /// Set the logged-out sentinel fact.
    pub fn with_logged_out(mut self, logged_out: bool) -> Self {
        self.is_logged_out = logged_out;
        self
    }

    /// Set the profile-pending fact.
    pub fn with_profile_pending(mut self, pending: bool) -> Self {
        self.is_profile_pending = pending;
        self
    }

    /// Set the permission-completed fact.
    pub fn with_permission_completed(mut self, completed: bool) -> Self {
        self.is_permission_completed = completed;
        self
    }

    /// Enumerate all 32 combinations of the five facts.
    pub fn all_combinations() -> impl Iterator<Item = AuthFacts> {
        (0u8..32).map(|bits| AuthFacts {
            has_token: bits & 0b00001 != 0,
            is_fresh_install: bits & 0b00010 != 0,
            is_logged_out: bits & 0b00100 != 0,
            is_profile_pending: bits & 0b01000 != 0,
            is_permission_completed: bits & 0b10000 != 0,
        })
    }
}
