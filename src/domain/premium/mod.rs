//! Premium domain module.
//!
//! One-time premium codes and the per-user premium status they grant.
//!
//! # Module Structure
//!
//! - `code` - PremiumCode value object and stored code record
//! - `status` - UserPremiumStatus record
//! - `errors` - PremiumError taxonomy

mod code;
mod errors;
mod status;

pub use code::{normalize, PremiumCode, PremiumCodeRecord};
pub use errors::{
    PersistenceStage, PremiumError, ALREADY_PREMIUM, CODE_ACTIVATION_FAILED,
    CODE_INVALID_OR_USED, INTERNAL_ERROR, MISSING_REDEEM_FIELDS, MISSING_USER_ID,
    STATUS_ACTIVATION_FAILED,
};
pub use status::{is_premium, UserPremiumStatus};
