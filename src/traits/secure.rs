//! Secure store trait abstraction.

use async_trait::async_trait;

use crate::domain::SecureProfile;
use crate::error::StoreError;

/// Secure storage for the user's token and profile.
///
/// The storage mechanics (keychain, encrypted file) belong to the
/// implementation; the state machine only reads the profile and asks for
/// everything to be wiped on logout.
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Load the stored profile.
    ///
    /// # Returns
    /// - `Ok(Some(profile))` if a profile is stored
    /// - `Ok(None)` if nothing is stored
    /// - `Err(error)` if reading failed
    async fn load_profile(&self) -> Result<Option<SecureProfile>, StoreError>;

    /// Store a profile, replacing any previous one.
    async fn save_profile(&self, profile: &SecureProfile) -> Result<(), StoreError>;

    /// Remove all user data held by the store.
    async fn clear_all(&self) -> Result<(), StoreError>;
}
