//! File-backed key-value store.
//!
//! Keeps every preference in one JSON object at `~/.waypoint/prefs.json`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use super::json_file::{data_dir, read_json, write_json_atomic};
use crate::error::StoreError;
use crate::traits::KeyValueStore;

/// The preferences file name.
const PREFS_FILE: &str = "prefs.json";

type Prefs = BTreeMap<String, Value>;

/// Key-value store persisted as a JSON object.
///
/// Each write re-reads the file, applies the change, and replaces the file
/// atomically. A mutex serializes writers within the process.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Create a store in `~/.waypoint`, or in `dir` when given.
    pub fn new(dir: Option<&Path>) -> Result<Self, StoreError> {
        Ok(Self::at_path(data_dir(dir)?.join(PREFS_FILE)))
    }

    /// Create a store backed by an explicit file.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Prefs, StoreError> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut prefs = self.load().map_err(|e| StoreError::ReadFailed {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(prefs.remove(key))
    }

    async fn update<F>(&self, key: &str, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Prefs) + Send,
    {
        let _guard = self.lock.lock().await;
        let write_failed = |e: StoreError| StoreError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        };
        let mut prefs = self.load().map_err(write_failed)?;
        apply(&mut prefs);
        write_json_atomic(&self.path, &prefs).map_err(write_failed)?;
        debug!(key, path = %self.path.display(), "Preference written");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.get(key).await? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(StoreError::TypeMismatch {
                key: key.to_string(),
            }),
        }
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let value = Value::String(value.to_string());
        self.update(key, |prefs| {
            prefs.insert(key.to_string(), value);
        })
        .await
    }

    async fn get_bool(&self, key: &str) -> Result<Option<bool>, StoreError> {
        match self.get(key).await? {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(b)),
            Some(_) => Err(StoreError::TypeMismatch {
                key: key.to_string(),
            }),
        }
    }

    async fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.update(key, |prefs| {
            prefs.insert(key.to_string(), Value::Bool(value));
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(key, |prefs| {
            prefs.remove(key);
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FileKeyValueStore {
        FileKeyValueStore::new(Some(dir.path())).unwrap()
    }

    #[tokio::test]
    async fn test_missing_keys_read_none() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        assert_eq!(store.get_bool("has_launched").await.unwrap(), None);
        assert_eq!(store.get_string("name").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_values_persist_across_instances() {
        let dir = TempDir::new().unwrap();
        store(&dir).set_bool("has_launched", true).await.unwrap();
        store(&dir).set_string("locale", "en").await.unwrap();

        let reopened = store(&dir);
        assert_eq!(reopened.get_bool("has_launched").await.unwrap(), Some(true));
        assert_eq!(
            reopened.get_string("locale").await.unwrap().as_deref(),
            Some("en")
        );
        assert!(reopened.path().ends_with(PREFS_FILE));
    }

    #[tokio::test]
    async fn test_remove() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.set_bool("flag", true).await.unwrap();
        store.remove("flag").await.unwrap();
        store.remove("never_set").await.unwrap();

        assert_eq!(store.get_bool("flag").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_type_mismatch() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.set_string("flag", "yes").await.unwrap();
        let err = store.get_bool("flag").await.unwrap_err();
        assert!(matches!(err, StoreError::TypeMismatch { .. }));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_read_failure() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::write(store.path(), "[1, 2").unwrap();

        let err = store.get_bool("flag").await.unwrap_err();
        assert_eq!(err.error_code(), "STORE_READ");
        assert!(err.is_transient());
    }
}
