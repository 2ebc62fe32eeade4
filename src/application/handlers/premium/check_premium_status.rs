//! CheckPremiumStatusHandler - Query handler reporting a user's premium flag.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::premium::{is_premium, PremiumError};
use crate::ports::PremiumStatusReader;

/// Query for a user's premium status.
#[derive(Debug, Clone)]
pub struct CheckPremiumStatusQuery {
    pub user_id: String,
}

/// Result of a premium status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckPremiumStatusResult {
    pub is_premium: bool,
}

/// Handler for premium status queries.
///
/// A user without any record is simply not premium; that is a successful answer.
pub struct CheckPremiumStatusHandler {
    statuses: Arc<dyn PremiumStatusReader>,
}

impl CheckPremiumStatusHandler {
    pub fn new(statuses: Arc<dyn PremiumStatusReader>) -> Self {
        Self { statuses }
    }

    pub async fn handle(
        &self,
        query: CheckPremiumStatusQuery,
    ) -> Result<CheckPremiumStatusResult, PremiumError> {
        let user_id = UserId::new(query.user_id).map_err(|_| PremiumError::missing_user_id())?;

        let status = self.statuses.find_by_user(&user_id).await?;

        Ok(CheckPremiumStatusResult {
            is_premium: is_premium(status.as_ref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, Timestamp};
    use crate::domain::premium::{PremiumCode, UserPremiumStatus};
    use async_trait::async_trait;

    struct MockStatusReader {
        status: Option<UserPremiumStatus>,
        fail: bool,
    }

    impl MockStatusReader {
        fn empty() -> Self {
            Self {
                status: None,
                fail: false,
            }
        }

        fn with_status(is_premium: bool) -> Self {
            Self {
                status: Some(UserPremiumStatus {
                    user_id: UserId::new("user_1").unwrap(),
                    is_premium,
                    premium_code_used: PremiumCode::try_new("FREE2024").unwrap(),
                    activated_at: Timestamp::now(),
                }),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                status: None,
                fail: true,
            }
        }
    }

    #[async_trait]
    impl PremiumStatusReader for MockStatusReader {
        async fn find_by_user(
            &self,
            user_id: &UserId,
        ) -> Result<Option<UserPremiumStatus>, DomainError> {
            if self.fail {
                return Err(DomainError::database("Simulated read failure"));
            }
            Ok(self.status.clone().filter(|s| &s.user_id == user_id))
        }
    }

    fn query(user_id: &str) -> CheckPremiumStatusQuery {
        CheckPremiumStatusQuery {
            user_id: user_id.to_string(),
        }
    }

    #[tokio::test]
    async fn unknown_user_is_not_premium() {
        let handler = CheckPremiumStatusHandler::new(Arc::new(MockStatusReader::empty()));
        let result = handler.handle(query("user_new")).await.unwrap();
        assert!(!result.is_premium);
    }

    #[tokio::test]
    async fn premium_user_is_premium() {
        let handler = CheckPremiumStatusHandler::new(Arc::new(MockStatusReader::with_status(true)));
        let result = handler.handle(query("user_1")).await.unwrap();
        assert!(result.is_premium);
    }

    #[tokio::test]
    async fn record_without_flag_is_not_premium() {
        let handler =
            CheckPremiumStatusHandler::new(Arc::new(MockStatusReader::with_status(false)));
        let result = handler.handle(query("user_1")).await.unwrap();
        assert!(!result.is_premium);
    }

    #[tokio::test]
    async fn empty_user_id_is_invalid_request() {
        let handler = CheckPremiumStatusHandler::new(Arc::new(MockStatusReader::empty()));
        let err = handler.handle(query("")).await.unwrap_err();
        assert_eq!(err.message(), "UserId is required");
    }

    #[tokio::test]
    async fn read_failure_is_internal_error() {
        let handler = CheckPremiumStatusHandler::new(Arc::new(MockStatusReader::failing()));
        let err = handler.handle(query("user_1")).await.unwrap_err();
        assert!(err.is_internal());
        assert_eq!(err.message(), "Internal server error");
    }
}
