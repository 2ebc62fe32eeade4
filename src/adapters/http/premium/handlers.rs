//! HTTP handlers for premium endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.
//! Bodies are parsed as JSON whatever `Content-Type` the caller sends.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::premium::{
    CheckPremiumStatusHandler, CheckPremiumStatusQuery, RedeemPremiumCodeCommand,
    RedeemPremiumCodeHandler,
};
use crate::domain::premium::PremiumError;
use crate::ports::{PremiumCodeRepository, PremiumStatusReader};

use super::dto::{
    ErrorResponse, PremiumStatusRequest, PremiumStatusResponse, RedeemCodeRequest,
    RedeemCodeResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; dependencies are Arc-wrapped.
#[derive(Clone)]
pub struct PremiumAppState {
    pub code_repository: Arc<dyn PremiumCodeRepository>,
    pub status_reader: Arc<dyn PremiumStatusReader>,
}

impl PremiumAppState {
    pub fn new(
        code_repository: Arc<dyn PremiumCodeRepository>,
        status_reader: Arc<dyn PremiumStatusReader>,
    ) -> Self {
        Self {
            code_repository,
            status_reader,
        }
    }

    pub fn redeem_handler(&self) -> RedeemPremiumCodeHandler {
        RedeemPremiumCodeHandler::new(self.code_repository.clone(), self.status_reader.clone())
    }

    pub fn status_handler(&self) -> CheckPremiumStatusHandler {
        CheckPremiumStatusHandler::new(self.status_reader.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/premium/redeem - Redeem a premium code for a user
pub async fn redeem_premium_code(
    State(state): State<PremiumAppState>,
    body: Bytes,
) -> Result<impl IntoResponse, PremiumApiError> {
    let request: RedeemCodeRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!("Unreadable redeem body: {}", e);
        PremiumError::missing_redeem_fields()
    })?;

    let cmd = RedeemPremiumCodeCommand {
        code: request.code.unwrap_or_default(),
        user_id: request.user_id.unwrap_or_default(),
    };

    state.redeem_handler().handle(cmd).await?;

    Ok(Json(RedeemCodeResponse::activated()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/premium/status - Report whether a user holds premium status
pub async fn check_premium_status(
    State(state): State<PremiumAppState>,
    body: Bytes,
) -> Result<impl IntoResponse, PremiumApiError> {
    let request: PremiumStatusRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!("Unreadable status body: {}", e);
        PremiumError::missing_user_id()
    })?;

    let query = CheckPremiumStatusQuery {
        user_id: request.user_id.unwrap_or_default(),
    };

    let result = state.status_handler().handle(query).await?;

    Ok(Json(PremiumStatusResponse {
        is_premium: result.is_premium,
    }))
}

/// OPTIONS on either endpoint - empty answer; CORS headers come from the layer
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct PremiumApiError(PremiumError);

impl From<PremiumError> for PremiumApiError {
    fn from(err: PremiumError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PremiumApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            PremiumError::InvalidRequest { .. }
            | PremiumError::CodeInvalidOrUsed
            | PremiumError::AlreadyPremium(_) => StatusCode::BAD_REQUEST,
            PremiumError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if self.0.is_internal() {
            tracing::error!(
                detail = self.0.detail().unwrap_or_default(),
                "Premium request failed: {}",
                self.0.message()
            );
        }

        let body = ErrorResponse::new(self.0.message());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::premium::PersistenceStage;

    #[test]
    fn business_rejections_are_bad_request() {
        for err in [
            PremiumError::missing_redeem_fields(),
            PremiumError::code_invalid_or_used(),
            PremiumError::already_premium(
                crate::domain::foundation::UserId::new("user_1").unwrap(),
            ),
        ] {
            let response = PremiumApiError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn persistence_errors_are_internal() {
        let err = PremiumError::persistence(PersistenceStage::CodeActivation, "db down");
        let response = PremiumApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
