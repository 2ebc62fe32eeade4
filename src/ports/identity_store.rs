//! Identity Store Port - Interface for persisting the visitor identifier.
//!
//! A client keeps exactly one identifier per storage location. The store only
//! loads and saves it; generation is the identity provider's job.

use async_trait::async_trait;

use crate::domain::foundation::UserId;

/// Errors that can occur during identity storage operations
#[derive(Debug, thiserror::Error)]
pub enum IdentityStoreError {
    #[error("Failed to serialize identity: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize identity: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for loading and saving the local visitor identifier
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Load the stored identifier
    ///
    /// # Returns
    /// `None` if no identifier has been saved yet
    async fn load(&self) -> Result<Option<UserId>, IdentityStoreError>;

    /// Save the identifier, replacing any previous value
    async fn save(&self, user_id: &UserId) -> Result<(), IdentityStoreError>;
}
