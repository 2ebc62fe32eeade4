//! Per-user premium status record.

use crate::domain::foundation::{Timestamp, UserId};
use serde::{Deserialize, Serialize};

use super::PremiumCode;

/// Premium standing of one visitor identity.
///
/// At most one record exists per `user_id`; a later grant replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPremiumStatus {
    pub user_id: UserId,
    pub is_premium: bool,
    pub premium_code_used: PremiumCode,
    pub activated_at: Timestamp,
}

impl UserPremiumStatus {
    /// Status granted by redeeming `code`.
    pub fn granted(user_id: UserId, code: PremiumCode, activated_at: Timestamp) -> Self {
        Self {
            user_id,
            is_premium: true,
            premium_code_used: code,
            activated_at,
        }
    }
}

/// Premium flag for an optional status record.
///
/// A missing record and a record with `is_premium = false` both mean
/// "not premium".
pub fn is_premium(status: Option<&UserPremiumStatus>) -> bool {
    status.map(|s| s.is_premium).unwrap_or(false)
}
