//! RedeemPremiumCodeHandler - Command handler exchanging a one-time code for premium status.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::premium::{is_premium, PremiumCode, PremiumError, UserPremiumStatus};
use crate::ports::{PremiumCodeRepository, PremiumStatusReader, RedemptionOutcome};

/// Command to redeem a premium code.
///
/// Fields are raw caller input; the handler validates and normalizes them.
#[derive(Debug, Clone)]
pub struct RedeemPremiumCodeCommand {
    pub code: String,
    pub user_id: String,
}

/// Result of a successful redemption.
#[derive(Debug, Clone)]
pub struct RedeemPremiumCodeResult {
    pub status: UserPremiumStatus,
}

/// Handler for premium code redemption.
///
/// The read checks (code unused, user not yet premium) are advisory; the
/// repository's conditional write is what guarantees a code is granted once.
pub struct RedeemPremiumCodeHandler {
    codes: Arc<dyn PremiumCodeRepository>,
    statuses: Arc<dyn PremiumStatusReader>,
}

impl RedeemPremiumCodeHandler {
    pub fn new(
        codes: Arc<dyn PremiumCodeRepository>,
        statuses: Arc<dyn PremiumStatusReader>,
    ) -> Self {
        Self { codes, statuses }
    }

    pub async fn handle(
        &self,
        cmd: RedeemPremiumCodeCommand,
    ) -> Result<RedeemPremiumCodeResult, PremiumError> {
        // 1. Both fields are required; the code is normalized here
        let (code, user_id) = match (PremiumCode::try_new(&cmd.code), UserId::new(cmd.user_id)) {
            (Ok(code), Ok(user_id)) => (code, user_id),
            _ => return Err(PremiumError::missing_redeem_fields()),
        };

        // 2. Code must exist and be unused
        if self.codes.find_unused(&code).await?.is_none() {
            warn!(user_id = %user_id, "Rejected unknown or used premium code");
            return Err(PremiumError::code_invalid_or_used());
        }

        // 3. A premium user cannot consume another code
        let existing = self.statuses.find_by_user(&user_id).await?;
        if is_premium(existing.as_ref()) {
            warn!(user_id = %user_id, "User already has premium access");
            return Err(PremiumError::already_premium(user_id));
        }

        // 4-5. Conditional consumption plus status grant
        match self.codes.redeem(&code, &user_id, Timestamp::now()).await? {
            RedemptionOutcome::Granted(status) => {
                info!(user_id = %user_id, code = %code, "Premium activated");
                Ok(RedeemPremiumCodeResult { status })
            }
            RedemptionOutcome::CodeUnavailable => {
                warn!(user_id = %user_id, "Premium code consumed by a concurrent redemption");
                Err(PremiumError::code_invalid_or_used())
            }
        }
    }
}
