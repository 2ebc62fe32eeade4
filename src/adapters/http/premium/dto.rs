//! HTTP DTOs (Data Transfer Objects) for premium endpoints.
//!
//! Field names follow the public wire format (`userId`, `isPremium`).
//! Request fields are optional so that a missing field surfaces as a
//! domain `InvalidRequest` rather than a framework rejection.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to redeem a premium code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemCodeRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Request for a user's premium status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumStatusRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a successful redemption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemCodeResponse {
    pub success: bool,
    pub message: String,
}

impl RedeemCodeResponse {
    pub fn activated() -> Self {
        Self {
            success: true,
            message: "Premium activated successfully".to_string(),
        }
    }
}

/// Response for a premium status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumStatusResponse {
    pub is_premium: bool,
}

/// Error body shared by both endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
