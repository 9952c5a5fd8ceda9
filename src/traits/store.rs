//! Key-value store trait abstraction.

use async_trait::async_trait;

use crate::error::StoreError;

/// Generic string/boolean preferences store.
///
/// Used for the first-launch marker, the logged-out sentinel, and the
/// permission-completed flag. Implementations include the JSON file store
/// and an in-memory store for tests.
///
/// # Example
///
/// ```ignore
/// use waypoint::traits::KeyValueStore;
///
/// async fn remember_launch<S: KeyValueStore>(store: &S) -> Result<(), StoreError> {
///     if store.get_bool("has_launched").await?.unwrap_or(false) {
///         return Ok(());
///     }
///     store.set_bool("has_launched", true).await
/// }
/// ```
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a string value. `Ok(None)` if the key is not set.
    async fn get_string(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a string value, replacing any previous value.
    async fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Read a boolean value. `Ok(None)` if the key is not set.
    async fn get_bool(&self, key: &str) -> Result<Option<bool>, StoreError>;

    /// Write a boolean value, replacing any previous value.
    async fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
