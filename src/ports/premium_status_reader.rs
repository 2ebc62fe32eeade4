//! Premium status reader port (read side).
//!
//! Read-only access to per-user premium records for the status query.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::premium::UserPremiumStatus;
use async_trait::async_trait;

/// Reader port for user premium status.
#[async_trait]
pub trait PremiumStatusReader: Send + Sync {
    /// Find the premium record for a user.
    ///
    /// Returns `None` if the user never redeemed a code.
    async fn find_by_user(&self, user_id: &UserId)
        -> Result<Option<UserPremiumStatus>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premium_status_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn PremiumStatusReader) {}
    }
}
