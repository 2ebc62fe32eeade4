//! PostgreSQL implementation of PremiumStatusReader.

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::premium::{PremiumCode, UserPremiumStatus};
use crate::ports::PremiumStatusReader;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// PostgreSQL implementation of the PremiumStatusReader port.
pub struct PostgresPremiumStatusReader {
    pool: PgPool,
}

impl PostgresPremiumStatusReader {
    /// Creates a new PostgresPremiumStatusReader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PremiumStatusRow {
    user_id: String,
    is_premium: bool,
    premium_code_used: String,
    activated_at: DateTime<Utc>,
}

impl TryFrom<PremiumStatusRow> for UserPremiumStatus {
    type Error = DomainError;

    fn try_from(row: PremiumStatusRow) -> Result<Self, Self::Error> {
        Ok(UserPremiumStatus {
            user_id: UserId::new(row.user_id)
                .map_err(|e| DomainError::database(format!("Invalid user_id: {}", e)))?,
            is_premium: row.is_premium,
            premium_code_used: PremiumCode::try_new(&row.premium_code_used).map_err(|e| {
                DomainError::database(format!("Invalid premium_code_used: {}", e))
            })?,
            activated_at: Timestamp::from_datetime(row.activated_at),
        })
    }
}

#[async_trait]
impl PremiumStatusReader for PostgresPremiumStatusReader {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserPremiumStatus>, DomainError> {
        let row: Option<PremiumStatusRow> = sqlx::query_as(
            r#"
            SELECT user_id, is_premium, premium_code_used, activated_at
            FROM user_premium_status
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find premium status: {}", e)))?;

        row.map(UserPremiumStatus::try_from).transpose()
    }
}
