//! In-memory key-value store for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::StoreError;
use crate::traits::KeyValueStore;

#[derive(Debug, Clone, PartialEq)]
enum StoredValue {
    Text(String),
    Flag(bool),
}

/// In-memory key-value store.
///
/// Clones share the same map, so a test can keep one handle and give the
/// other to the app.
///
/// # Example
///
/// ```ignore
/// use waypoint::adapters::mock::InMemoryStore;
/// use waypoint::traits::KeyValueStore;
///
/// let store = InMemoryStore::new();
/// store.set_bool("has_launched", true).await?;
/// assert_eq!(store.get_bool("has_launched").await?, Some(true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    values: Arc<Mutex<HashMap<String, StoredValue>>>,
    read_should_fail: Arc<Mutex<bool>>,
    write_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure whether reads should fail.
    pub fn set_read_should_fail(&self, should_fail: bool) {
        *self.read_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether writes and removals should fail.
    pub fn set_write_should_fail(&self, should_fail: bool) {
        *self.write_should_fail.lock().unwrap() = should_fail;
    }

    /// Set a boolean synchronously (for testing).
    pub fn set_bool_sync(&self, key: &str, value: bool) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), StoredValue::Flag(value));
    }

    /// Get a boolean synchronously (for testing).
    pub fn get_bool_sync(&self, key: &str) -> Option<bool> {
        match self.values.lock().unwrap().get(key) {
            Some(StoredValue::Flag(value)) => Some(*value),
            _ => None,
        }
    }

    /// Whether a key is present (for testing).
    pub fn contains(&self, key: &str) -> bool {
        self.values.lock().unwrap().contains_key(key)
    }

    fn check_read(&self, key: &str) -> Result<(), StoreError> {
        if *self.read_should_fail.lock().unwrap() {
            return Err(StoreError::ReadFailed {
                key: key.to_string(),
                message: "Mock read failure".to_string(),
            });
        }
        Ok(())
    }

    fn check_write(&self, key: &str) -> Result<(), StoreError> {
        if *self.write_should_fail.lock().unwrap() {
            return Err(StoreError::WriteFailed {
                key: key.to_string(),
                message: "Mock write failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check_read(key)?;
        match self.values.lock().unwrap().get(key) {
            None => Ok(None),
            Some(StoredValue::Text(value)) => Ok(Some(value.clone())),
            Some(StoredValue::Flag(_)) => Err(StoreError::TypeMismatch {
                key: key.to_string(),
            }),
        }
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_write(key)?;
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), StoredValue::Text(value.to_string()));
        Ok(())
    }

    async fn get_bool(&self, key: &str) -> Result<Option<bool>, StoreError> {
        self.check_read(key)?;
        match self.values.lock().unwrap().get(key) {
            None => Ok(None),
            Some(StoredValue::Flag(value)) => Ok(Some(*value)),
            Some(StoredValue::Text(_)) => Err(StoreError::TypeMismatch {
                key: key.to_string(),
            }),
        }
    }

    async fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.check_write(key)?;
        self.set_bool_sync(key, value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check_write(key)?;
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}
