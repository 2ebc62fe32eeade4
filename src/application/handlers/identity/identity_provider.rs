//! IdentityProvider - get-or-create for the local visitor identifier.
//!
//! The identifier is generated once per store and then reused. It is handed to
//! callers as a plain `UserId` value; nothing else in the crate reads it from
//! ambient state.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::foundation::UserId;
use crate::ports::{IdentityStore, IdentityStoreError};

/// Supplies the stable visitor identifier for one client context.
pub struct IdentityProvider {
    store: Arc<dyn IdentityStore>,
    cached: Mutex<Option<UserId>>,
}

impl IdentityProvider {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self {
            store,
            cached: Mutex::new(None),
        }
    }

    /// Returns the stored identifier, generating and persisting one on first use.
    ///
    /// Concurrent first calls on the same provider observe a single identifier.
    pub async fn get_or_create_id(&self) -> Result<UserId, IdentityStoreError> {
        let mut cached = self.cached.lock().await;
        if let Some(id) = cached.as_ref() {
            return Ok(id.clone());
        }

        let id = match self.store.load().await? {
            Some(id) => id,
            None => {
                let id = UserId::generate();
                self.store.save(&id).await?;
                debug!(user_id = %id, "Generated new visitor identifier");
                id
            }
        };

        *cached = Some(id.clone());
        Ok(id)
    }
}
