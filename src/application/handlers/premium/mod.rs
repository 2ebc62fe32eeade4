//! Premium handlers.
//!
//! ## Commands
//! - Redeeming a one-time premium code
//! - Provisioning unused codes
//!
//! ## Queries
//! - Checking a user's premium status

mod check_premium_status;
mod provision_premium_codes;
mod redeem_premium_code;

// Commands
pub use redeem_premium_code::{
    RedeemPremiumCodeCommand, RedeemPremiumCodeHandler, RedeemPremiumCodeResult,
};

pub use provision_premium_codes::{
    ProvisionPremiumCodesCommand, ProvisionPremiumCodesHandler, ProvisionPremiumCodesResult,
};

// Queries
pub use check_premium_status::{
    CheckPremiumStatusHandler, CheckPremiumStatusQuery, CheckPremiumStatusResult,
};
