//! File-based Identity Store Adapter
//!
//! Keeps the visitor identifier in a small YAML file so it survives restarts
//! of the client process.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::UserId;
use crate::ports::{IdentityStore, IdentityStoreError};

/// On-disk layout of the identity file
#[derive(Debug, Serialize, Deserialize)]
struct IdentityFile {
    user_id: UserId,
}

/// File-based storage for the visitor identifier
#[derive(Debug, Clone)]
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    /// Create a store backed by the file at `path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileIdentityStore::new("./data/identity.yaml");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the identity file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl IdentityStore for FileIdentityStore {
    async fn load(&self) -> Result<Option<UserId>, IdentityStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let yaml = fs::read_to_string(&self.path)
            .await
            .map_err(|e| IdentityStoreError::IoError(e.to_string()))?;

        let file: IdentityFile = serde_yaml::from_str(&yaml)
            .map_err(|e| IdentityStoreError::DeserializationFailed(e.to_string()))?;

        Ok(Some(file.user_id))
    }

    async fn save(&self, user_id: &UserId) -> Result<(), IdentityStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| IdentityStoreError::IoError(e.to_string()))?;
        }

        let yaml = serde_yaml::to_string(&IdentityFile {
            user_id: user_id.clone(),
        })
        .map_err(|e| IdentityStoreError::SerializationFailed(e.to_string()))?;

        fs::write(&self.path, yaml)
            .await
            .map_err(|e| IdentityStoreError::IoError(e.to_string()))?;

        Ok(())
    }
}
