//! Premium code repository port (write side).
//!
//! Defines the contract for looking up and consuming premium codes.
//!
//! # Design
//!
//! - **Normalized keys**: every method receives an already-normalized `PremiumCode`
//! - **Conditional consumption**: `redeem` only succeeds while `is_used` is still
//!   false at write time; a lost race is reported as `CodeUnavailable`, not as an error
//! - **Single unit of work**: `redeem` consumes the code and upserts the user's
//!   premium status together; stores with transactions must commit both or neither
//!
//! # Example
//!
//! ```ignore
//! match repo.redeem(&code, &user_id, Timestamp::now()).await? {
//!     RedemptionOutcome::Granted(status) => { /* premium active */ }
//!     RedemptionOutcome::CodeUnavailable => { /* someone else won */ }
//! }
//! ```

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::premium::{PremiumCode, PremiumCodeRecord, UserPremiumStatus};
use async_trait::async_trait;

/// Result of a conditional redemption write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedemptionOutcome {
    /// The code was consumed and the user's status recorded.
    Granted(UserPremiumStatus),
    /// The code was missing or already consumed when the write ran.
    CodeUnavailable,
}

impl RedemptionOutcome {
    /// Returns true if premium status was granted.
    pub fn is_granted(&self) -> bool {
        matches!(self, RedemptionOutcome::Granted(_))
    }
}

/// Repository port for premium codes.
///
/// Implementations must ensure:
/// - A code transitions to used at most once
/// - `used_by` / `used_at` are written in the same update as `is_used`
#[async_trait]
pub trait PremiumCodeRepository: Send + Sync {
    /// Provision a new unused code.
    ///
    /// # Errors
    ///
    /// - `PremiumCodeExists` if the code is already provisioned
    /// - `DatabaseError` on persistence failure
    async fn create(&self, code: &PremiumCode) -> Result<(), DomainError>;

    /// Find a code that has not been used yet.
    ///
    /// Returns `None` both for unknown and for consumed codes.
    async fn find_unused(&self, code: &PremiumCode)
        -> Result<Option<PremiumCodeRecord>, DomainError>;

    /// Consume `code` for `user_id` and grant premium status.
    ///
    /// # Errors
    ///
    /// - `CodeActivationFailed` if marking the code used failed
    /// - `StatusActivationFailed` if recording the premium status failed
    async fn redeem(
        &self,
        code: &PremiumCode,
        user_id: &UserId,
        at: Timestamp,
    ) -> Result<RedemptionOutcome, DomainError>;
}
