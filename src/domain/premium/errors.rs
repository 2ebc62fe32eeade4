//! Premium-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidRequest | 400 |
//! | CodeInvalidOrUsed | 400 |
//! | AlreadyPremium | 400 |
//! | Persistence | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

pub const MISSING_REDEEM_FIELDS: &str = "Code and userId are required";
pub const MISSING_USER_ID: &str = "UserId is required";
pub const CODE_INVALID_OR_USED: &str = "Invalid or already used premium code";
pub const ALREADY_PREMIUM: &str = "User already has premium access";
pub const CODE_ACTIVATION_FAILED: &str = "Failed to activate premium code";
pub const STATUS_ACTIVATION_FAILED: &str = "Failed to activate premium status";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Which store interaction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceStage {
    /// Reading a code or a status record.
    Lookup,
    /// Marking the code consumed.
    CodeActivation,
    /// Recording the user's premium status.
    StatusActivation,
}

/// Premium redemption and status errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PremiumError {
    /// A required field was missing or blank.
    InvalidRequest { message: String },

    /// The code does not exist or was already consumed. The two cases are
    /// reported identically so callers cannot probe for existing codes.
    CodeInvalidOrUsed,

    /// The user already holds premium status.
    AlreadyPremium(UserId),

    /// The data store failed.
    Persistence {
        stage: PersistenceStage,
        detail: String,
    },
}

impl PremiumError {
    pub fn missing_redeem_fields() -> Self {
        PremiumError::InvalidRequest {
            message: MISSING_REDEEM_FIELDS.to_string(),
        }
    }

    pub fn missing_user_id() -> Self {
        PremiumError::InvalidRequest {
            message: MISSING_USER_ID.to_string(),
        }
    }

    pub fn code_invalid_or_used() -> Self {
        PremiumError::CodeInvalidOrUsed
    }

    pub fn already_premium(user_id: UserId) -> Self {
        PremiumError::AlreadyPremium(user_id)
    }

    pub fn persistence(stage: PersistenceStage, detail: impl Into<String>) -> Self {
        PremiumError::Persistence {
            stage,
            detail: detail.into(),
        }
    }

    /// Returns the caller-facing message for this error.
    ///
    /// Store details never leak; they are only available through `detail()`.
    pub fn message(&self) -> String {
        match self {
            PremiumError::InvalidRequest { message } => message.clone(),
            PremiumError::CodeInvalidOrUsed => CODE_INVALID_OR_USED.to_string(),
            PremiumError::AlreadyPremium(_) => ALREADY_PREMIUM.to_string(),
            PremiumError::Persistence { stage, .. } => match stage {
                PersistenceStage::Lookup => INTERNAL_ERROR.to_string(),
                PersistenceStage::CodeActivation => CODE_ACTIVATION_FAILED.to_string(),
                PersistenceStage::StatusActivation => STATUS_ACTIVATION_FAILED.to_string(),
            },
        }
    }

    /// Internal failure detail, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            PremiumError::Persistence { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// Returns true for faults on our side rather than the caller's.
    pub fn is_internal(&self) -> bool {
        matches!(self, PremiumError::Persistence { .. })
    }
}

impl std::fmt::Display for PremiumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PremiumError {}

impl From<DomainError> for PremiumError {
    fn from(err: DomainError) -> Self {
        let stage = match err.code {
            ErrorCode::CodeActivationFailed => PersistenceStage::CodeActivation,
            ErrorCode::StatusActivationFailed => PersistenceStage::StatusActivation,
            _ => PersistenceStage::Lookup,
        };
        PremiumError::persistence(stage, err.to_string())
    }
}
