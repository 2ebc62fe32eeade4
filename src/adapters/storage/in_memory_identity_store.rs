//! In-Memory Identity Store Adapter
//!
//! Holds the visitor identifier for the lifetime of the process.
//! Useful for testing and short-lived clients.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::ports::{IdentityStore, IdentityStoreError};

/// In-memory storage for the visitor identifier
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityStore {
    user_id: Arc<RwLock<Option<UserId>>>,
}

impl InMemoryIdentityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `user_id`
    pub fn with_id(user_id: UserId) -> Self {
        Self {
            user_id: Arc::new(RwLock::new(Some(user_id))),
        }
    }

    /// Forget the stored identifier, as a visitor clearing local storage would
    pub async fn clear(&self) {
        *self.user_id.write().await = None;
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn load(&self) -> Result<Option<UserId>, IdentityStoreError> {
        Ok(self.user_id.read().await.clone())
    }

    async fn save(&self, user_id: &UserId) -> Result<(), IdentityStoreError> {
        *self.user_id.write().await = Some(user_id.clone());
        Ok(())
    }
}
