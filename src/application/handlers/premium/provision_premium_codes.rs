//! ProvisionPremiumCodesHandler - Command handler inserting unused codes.
//!
//! Used at startup to seed codes from configuration. Codes that already
//! exist are left untouched, so provisioning is safe to repeat.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::premium::PremiumCode;
use crate::ports::PremiumCodeRepository;

/// Command to provision a batch of codes.
#[derive(Debug, Clone, Default)]
pub struct ProvisionPremiumCodesCommand {
    pub codes: Vec<String>,
}

/// Result of provisioning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionPremiumCodesResult {
    pub created: Vec<PremiumCode>,
    pub already_present: Vec<PremiumCode>,
}

pub struct ProvisionPremiumCodesHandler {
    codes: Arc<dyn PremiumCodeRepository>,
}

impl ProvisionPremiumCodesHandler {
    pub fn new(codes: Arc<dyn PremiumCodeRepository>) -> Self {
        Self { codes }
    }

    pub async fn handle(
        &self,
        cmd: ProvisionPremiumCodesCommand,
    ) -> Result<ProvisionPremiumCodesResult, DomainError> {
        let mut result = ProvisionPremiumCodesResult::default();

        for raw in cmd.codes {
            let code = PremiumCode::try_new(&raw)?;
            match self.codes.create(&code).await {
                Ok(()) => {
                    tracing::info!(code = %code, "Provisioned premium code");
                    result.created.push(code);
                }
                Err(err) if err.code == ErrorCode::PremiumCodeExists => {
                    tracing::debug!(code = %code, "Premium code already provisioned");
                    result.already_present.push(code);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(result)
    }
}
