//! PostgreSQL implementation of PremiumCodeRepository.
//!
//! Redemption is a conditional `UPDATE ... WHERE is_used = FALSE` followed by
//! a status upsert, both inside one transaction.

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::premium::{PremiumCode, PremiumCodeRecord, UserPremiumStatus};
use crate::ports::{PremiumCodeRepository, RedemptionOutcome};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// PostgreSQL implementation of the PremiumCodeRepository port.
pub struct PostgresPremiumCodeRepository {
    pool: PgPool,
}

impl PostgresPremiumCodeRepository {
    /// Creates a new PostgresPremiumCodeRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a premium code.
#[derive(Debug, sqlx::FromRow)]
struct PremiumCodeRow {
    code: String,
    is_used: bool,
    used_by: Option<String>,
    used_at: Option<DateTime<Utc>>,
}

impl TryFrom<PremiumCodeRow> for PremiumCodeRecord {
    type Error = DomainError;

    fn try_from(row: PremiumCodeRow) -> Result<Self, Self::Error> {
        let code = PremiumCode::try_new(&row.code).map_err(|e| {
            DomainError::database(format!("Invalid stored premium code: {}", e))
        })?;
        let used_by = row
            .used_by
            .map(UserId::new)
            .transpose()
            .map_err(|e| DomainError::database(format!("Invalid used_by: {}", e)))?;

        Ok(PremiumCodeRecord {
            code,
            is_used: row.is_used,
            used_by,
            used_at: row.used_at.map(Timestamp::from_datetime),
        })
    }
}

fn activation_error(code: ErrorCode, stage: &str, err: sqlx::Error) -> DomainError {
    DomainError::new(code, format!("Failed to {}: {}", stage, err))
}

#[async_trait]
impl PremiumCodeRepository for PostgresPremiumCodeRepository {
    async fn create(&self, code: &PremiumCode) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO premium_codes (code, is_used) VALUES ($1, FALSE)")
            .bind(code.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.constraint() == Some("premium_codes_pkey") {
                        return DomainError::new(
                            ErrorCode::PremiumCodeExists,
                            format!("Premium code already provisioned: {}", code),
                        );
                    }
                }
                DomainError::database(format!("Failed to create premium code: {}", e))
            })?;

        Ok(())
    }

    async fn find_unused(
        &self,
        code: &PremiumCode,
    ) -> Result<Option<PremiumCodeRecord>, DomainError> {
        let row: Option<PremiumCodeRow> = sqlx::query_as(
            r#"
            SELECT code, is_used, used_by, used_at
            FROM premium_codes
            WHERE code = $1 AND is_used = FALSE
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find premium code: {}", e)))?;

        row.map(PremiumCodeRecord::try_from).transpose()
    }

    async fn redeem(
        &self,
        code: &PremiumCode,
        user_id: &UserId,
        at: Timestamp,
    ) -> Result<RedemptionOutcome, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            activation_error(ErrorCode::CodeActivationFailed, "begin transaction", e)
        })?;

        let consumed = sqlx::query(
            r#"
            UPDATE premium_codes SET
                is_used = TRUE,
                used_by = $2,
                used_at = $3
            WHERE code = $1 AND is_used = FALSE
            "#,
        )
        .bind(code.as_str())
        .bind(user_id.as_str())
        .bind(at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| activation_error(ErrorCode::CodeActivationFailed, "consume premium code", e))?;

        if consumed.rows_affected() == 0 {
            tx.rollback().await.map_err(|e| {
                activation_error(ErrorCode::CodeActivationFailed, "roll back transaction", e)
            })?;
            return Ok(RedemptionOutcome::CodeUnavailable);
        }

        let granted = sqlx::query(
            r#"
            INSERT INTO user_premium_status (user_id, is_premium, premium_code_used, activated_at)
            VALUES ($1, TRUE, $2, $3)
            ON CONFLICT (user_id) DO UPDATE SET
                is_premium = EXCLUDED.is_premium,
                premium_code_used = EXCLUDED.premium_code_used,
                activated_at = EXCLUDED.activated_at
            "#,
        )
        .bind(user_id.as_str())
        .bind(code.as_str())
        .bind(at.as_datetime())
        .execute(&mut *tx)
        .await;

        if let Err(e) = granted {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!("Failed to roll back redemption of {}: {}", code, rollback_err);
            }
            return Err(activation_error(
                ErrorCode::StatusActivationFailed,
                "record premium status",
                e,
            ));
        }

        tx.commit().await.map_err(|e| {
            activation_error(ErrorCode::StatusActivationFailed, "commit redemption", e)
        })?;

        Ok(RedemptionOutcome::Granted(UserPremiumStatus::granted(
            user_id.clone(),
            code.clone(),
            at,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn used_row_converts_to_record() {
        let now = Utc::now();
        let row = PremiumCodeRow {
            code: "FREE2024".to_string(),
            is_used: true,
            used_by: Some("user_1".to_string()),
            used_at: Some(now),
        };

        let record = PremiumCodeRecord::try_from(row).unwrap();

        assert!(record.is_used);
        assert_eq!(record.used_by.unwrap().as_str(), "user_1");
        assert_eq!(record.used_at, Some(Timestamp::from_datetime(now)));
    }

    #[test]
    fn unused_row_converts_to_available_record() {
        let row = PremiumCodeRow {
            code: "FREE2024".to_string(),
            is_used: false,
            used_by: None,
            used_at: None,
        };

        let record = PremiumCodeRecord::try_from(row).unwrap();
        assert!(record.is_available());
    }

    #[test]
    fn blank_stored_code_is_rejected() {
        let row = PremiumCodeRow {
            code: "  ".to_string(),
            is_used: false,
            used_by: None,
            used_at: None,
        };

        let err = PremiumCodeRecord::try_from(row).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    // Live database tests. They need a Postgres instance and are skipped by
    // default. Run with: DATABASE_URL=postgres://... cargo test -- --ignored

    mod live {
        use super::*;
        use sqlx::postgres::PgPoolOptions;
        use std::sync::Arc;
        use uuid::Uuid;

        async fn pool() -> PgPool {
            let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&url)
                .await
                .unwrap();
            sqlx::migrate!("./migrations").run(&pool).await.unwrap();
            pool
        }

        fn fresh_code() -> PremiumCode {
            PremiumCode::try_new(&format!("LIVE-{}", Uuid::new_v4().simple())).unwrap()
        }

        fn fresh_user(prefix: &str) -> UserId {
            UserId::new(format!("{}{}", prefix, Uuid::new_v4().simple())).unwrap()
        }

        async fn is_used(pool: &PgPool, code: &PremiumCode) -> bool {
            let (used,): (bool,) =
                sqlx::query_as("SELECT is_used FROM premium_codes WHERE code = $1")
                    .bind(code.as_str())
                    .fetch_one(pool)
                    .await
                    .unwrap();
            used
        }

        #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
        #[ignore]
        async fn concurrent_redeems_grant_exactly_once() {
            let pool = pool().await;
            let repo = Arc::new(PostgresPremiumCodeRepository::new(pool.clone()));
            let code = fresh_code();
            repo.create(&code).await.unwrap();

            let first = fresh_user("user_");
            let second = fresh_user("user_");
            let (a, b) = tokio::join!(
                {
                    let repo = repo.clone();
                    let (code, user) = (code.clone(), first.clone());
                    tokio::spawn(async move { repo.redeem(&code, &user, Timestamp::now()).await })
                },
                {
                    let repo = repo.clone();
                    let (code, user) = (code.clone(), second.clone());
                    tokio::spawn(async move { repo.redeem(&code, &user, Timestamp::now()).await })
                }
            );
            let outcomes = [a.unwrap().unwrap(), b.unwrap().unwrap()];

            let granted = outcomes.iter().filter(|o| o.is_granted()).count();
            assert_eq!(granted, 1);
            assert!(outcomes.contains(&RedemptionOutcome::CodeUnavailable));
            assert!(is_used(&pool, &code).await);

            let (granted_rows,): (i64,) = sqlx::query_as(
                "SELECT COUNT(*) FROM user_premium_status WHERE premium_code_used = $1",
            )
            .bind(code.as_str())
            .fetch_one(&pool)
            .await
            .unwrap();
            assert_eq!(granted_rows, 1);
        }

        #[tokio::test]
        #[ignore]
        async fn failed_grant_rolls_back_consumption() {
            let pool = pool().await;
            sqlx::query(
                r#"
                CREATE OR REPLACE FUNCTION reject_test_grant() RETURNS trigger AS $$
                BEGIN
                    IF NEW.user_id LIKE 'user_reject_%' THEN
                        RAISE EXCEPTION 'grant rejected';
                    END IF;
                    RETURN NEW;
                END
                $$ LANGUAGE plpgsql
                "#,
            )
            .execute(&pool)
            .await
            .unwrap();
            sqlx::query("DROP TRIGGER IF EXISTS reject_test_grant ON user_premium_status")
                .execute(&pool)
                .await
                .unwrap();
            sqlx::query(
                "CREATE TRIGGER reject_test_grant BEFORE INSERT OR UPDATE ON user_premium_status \
                 FOR EACH ROW EXECUTE FUNCTION reject_test_grant()",
            )
            .execute(&pool)
            .await
            .unwrap();

            let repo = PostgresPremiumCodeRepository::new(pool.clone());
            let code = fresh_code();
            repo.create(&code).await.unwrap();

            let err = repo
                .redeem(&code, &fresh_user("user_reject_"), Timestamp::now())
                .await
                .unwrap_err();

            assert_eq!(err.code, ErrorCode::StatusActivationFailed);
            assert!(!is_used(&pool, &code).await);

            let outcome = repo
                .redeem(&code, &fresh_user("user_"), Timestamp::now())
                .await
                .unwrap();
            assert!(outcome.is_granted());
        }

        #[tokio::test]
        #[ignore]
        async fn duplicate_create_reports_existing_code() {
            let pool = pool().await;
            let repo = PostgresPremiumCodeRepository::new(pool);
            let code = fresh_code();
            repo.create(&code).await.unwrap();

            let err = repo.create(&code).await.unwrap_err();

            assert_eq!(err.code, ErrorCode::PremiumCodeExists);
        }

        #[tokio::test]
        #[ignore]
        async fn unknown_code_is_unavailable() {
            let repo = PostgresPremiumCodeRepository::new(pool().await);

            let outcome = repo
                .redeem(&fresh_code(), &fresh_user("user_"), Timestamp::now())
                .await
                .unwrap();

            assert_eq!(outcome, RedemptionOutcome::CodeUnavailable);
        }
    }
}
