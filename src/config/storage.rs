//! Storage configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Which persistence backend serves premium codes and statuses
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

/// Storage configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Backend selection
    #[serde(default)]
    pub backend: StorageBackend,

    /// Codes to provision at startup (comma-separated)
    pub seed_codes: Option<String>,
}

impl StorageConfig {
    /// Get seed codes as a vector, skipping blank entries
    pub fn seed_codes_list(&self) -> Vec<String> {
        self.seed_codes
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_memory(&self) -> bool {
        self.backend == StorageBackend::Memory
    }

    /// Validate storage configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if production && self.is_memory() {
            return Err(ValidationError::MemoryStorageInProduction);
        }
        Ok(())
    }
}
