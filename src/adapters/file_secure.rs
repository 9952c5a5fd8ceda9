//! File-backed secure store.
//!
//! Stores the signed-in profile at `~/.waypoint/.profile.json`. On Unix the
//! file is restricted to the owner.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use super::json_file::{data_dir, read_json, remove_file, write_json_atomic};
use crate::domain::SecureProfile;
use crate::error::StoreError;
use crate::traits::SecureStore;

/// The profile file name.
const PROFILE_FILE: &str = ".profile.json";

/// Secure store persisted as a single JSON file.
#[derive(Debug, Clone)]
pub struct FileSecureStore {
    path: PathBuf,
}

impl FileSecureStore {
    /// Create a store in `~/.waypoint`, or in `dir` when given.
    pub fn new(dir: Option<&Path>) -> Result<Self, StoreError> {
        Ok(Self {
            path: data_dir(dir)?.join(PROFILE_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(unix)]
    fn restrict_permissions(&self) -> Result<(), StoreError> {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
            .map_err(|e| StoreError::io(&self.path, e))
    }

    #[cfg(not(unix))]
    fn restrict_permissions(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl SecureStore for FileSecureStore {
    async fn load_profile(&self) -> Result<Option<SecureProfile>, StoreError> {
        read_json(&self.path).map_err(|e| StoreError::ReadFailed {
            key: PROFILE_FILE.to_string(),
            message: e.to_string(),
        })
    }

    async fn save_profile(&self, profile: &SecureProfile) -> Result<(), StoreError> {
        write_json_atomic(&self.path, profile)
            .and_then(|()| self.restrict_permissions())
            .map_err(|e| StoreError::WriteFailed {
                key: PROFILE_FILE.to_string(),
                message: e.to_string(),
            })
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        remove_file(&self.path).map_err(|e| StoreError::ClearFailed(e.to_string()))?;
        info!(path = %self.path.display(), "Cleared stored profile");
        Ok(())
    }
}
