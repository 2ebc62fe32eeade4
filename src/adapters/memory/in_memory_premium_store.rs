//! In-Memory Premium Store Adapter
//!
//! Holds premium codes and user status records in memory.
//! Useful for testing and single-process development deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::premium::{PremiumCode, PremiumCodeRecord, UserPremiumStatus};
use crate::ports::{PremiumCodeRepository, PremiumStatusReader, RedemptionOutcome};

#[derive(Debug, Default)]
struct PremiumState {
    codes: HashMap<PremiumCode, PremiumCodeRecord>,
    statuses: HashMap<UserId, UserPremiumStatus>,
}

/// In-memory implementation of both premium ports.
///
/// Codes and statuses share one lock so `redeem` applies the conditional
/// consumption and the status grant as a single step.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPremiumStore {
    state: Arc<RwLock<PremiumState>>,
}

impl InMemoryPremiumStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-provisioned with unused codes
    pub fn with_codes<I>(codes: I) -> Self
    where
        I: IntoIterator<Item = PremiumCode>,
    {
        let state = PremiumState {
            codes: codes
                .into_iter()
                .map(|code| (code.clone(), PremiumCodeRecord::unused(code)))
                .collect(),
            statuses: HashMap::new(),
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Number of codes not yet consumed
    pub async fn unused_count(&self) -> usize {
        self.state
            .read()
            .await
            .codes
            .values()
            .filter(|r| r.is_available())
            .count()
    }

    /// Number of users holding a status record
    pub async fn status_count(&self) -> usize {
        self.state.read().await.statuses.len()
    }
}

#[async_trait]
impl PremiumCodeRepository for InMemoryPremiumStore {
    async fn create(&self, code: &PremiumCode) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.codes.contains_key(code) {
            return Err(DomainError::new(
                ErrorCode::PremiumCodeExists,
                format!("Premium code already provisioned: {}", code),
            ));
        }
        state
            .codes
            .insert(code.clone(), PremiumCodeRecord::unused(code.clone()));
        Ok(())
    }

    async fn find_unused(
        &self,
        code: &PremiumCode,
    ) -> Result<Option<PremiumCodeRecord>, DomainError> {
        let state = self.state.read().await;
        Ok(state.codes.get(code).filter(|r| r.is_available()).cloned())
    }

    async fn redeem(
        &self,
        code: &PremiumCode,
        user_id: &UserId,
        at: Timestamp,
    ) -> Result<RedemptionOutcome, DomainError> {
        let mut state = self.state.write().await;

        let consumed = match state.codes.get_mut(code) {
            Some(record) => record.consume(user_id, at),
            None => false,
        };
        if !consumed {
            return Ok(RedemptionOutcome::CodeUnavailable);
        }

        let status = UserPremiumStatus::granted(user_id.clone(), code.clone(), at);
        state.statuses.insert(user_id.clone(), status.clone());
        Ok(RedemptionOutcome::Granted(status))
    }
}

#[async_trait]
impl PremiumStatusReader for InMemoryPremiumStore {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserPremiumStatus>, DomainError> {
        Ok(self.state.read().await.statuses.get(user_id).cloned())
    }
}
