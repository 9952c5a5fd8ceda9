//! In-memory secure store for testing.
//!
//! Provides a secure store that keeps the profile in memory, with failure
//! injection and an optional artificial delay on `clear_all` so tests can
//! observe a logout while it is in flight.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::SecureProfile;
use crate::error::StoreError;
use crate::traits::SecureStore;

/// In-memory secure store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySecureStore {
    /// Stored profile
    profile: Arc<Mutex<Option<SecureProfile>>>,
    /// Whether load should fail
    load_should_fail: Arc<Mutex<bool>>,
    /// Whether clear should fail
    clear_should_fail: Arc<Mutex<bool>>,
    /// Delay applied before clear completes
    clear_delay: Arc<Mutex<Option<Duration>>>,
}

impl InMemorySecureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding an initial profile.
    pub fn with_profile(profile: SecureProfile) -> Self {
        let store = Self::new();
        store.set_profile(Some(profile));
        store
    }

    pub fn set_load_should_fail(&self, should_fail: bool) {
        *self.load_should_fail.lock().unwrap() = should_fail;
    }

    pub fn set_clear_should_fail(&self, should_fail: bool) {
        *self.clear_should_fail.lock().unwrap() = should_fail;
    }

    /// Make `clear_all` sleep before completing.
    pub fn set_clear_delay(&self, delay: Option<Duration>) {
        *self.clear_delay.lock().unwrap() = delay;
    }

    /// Get the current profile synchronously (for testing).
    pub fn get_profile(&self) -> Option<SecureProfile> {
        self.profile.lock().unwrap().clone()
    }

    /// Set the profile synchronously (for testing).
    pub fn set_profile(&self, profile: Option<SecureProfile>) {
        *self.profile.lock().unwrap() = profile;
    }
}

#[async_trait]
impl SecureStore for InMemorySecureStore {
    async fn load_profile(&self) -> Result<Option<SecureProfile>, StoreError> {
        if *self.load_should_fail.lock().unwrap() {
            return Err(StoreError::ReadFailed {
                key: "profile".to_string(),
                message: "Mock load failure".to_string(),
            });
        }
        Ok(self.get_profile())
    }

    async fn save_profile(&self, profile: &SecureProfile) -> Result<(), StoreError> {
        self.set_profile(Some(profile.clone()));
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        let delay = *self.clear_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if *self.clear_should_fail.lock().unwrap() {
            return Err(StoreError::ClearFailed("Mock clear failure".to_string()));
        }

        self.set_profile(None);
        Ok(())
    }
}
