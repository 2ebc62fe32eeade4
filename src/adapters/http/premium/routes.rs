//! Axum router configuration for premium endpoints.

use axum::{routing::post, Router};

use super::handlers::{check_premium_status, preflight, redeem_premium_code, PremiumAppState};

/// Create the premium API router.
///
/// # Routes
///
/// - `POST /redeem` - Redeem a premium code (`{ code, userId }`)
/// - `POST /status` - Check premium status (`{ userId }`)
///
/// Both routes also answer `OPTIONS` with an empty body.
pub fn premium_routes() -> Router<PremiumAppState> {
    Router::new()
        .route("/redeem", post(redeem_premium_code).options(preflight))
        .route("/status", post(check_premium_status).options(preflight))
}

/// Create the complete premium module router, mounted at `/api/premium`.
///
/// # Example
///
/// ```ignore
/// let app = premium_router().with_state(app_state);
/// ```
pub fn premium_router() -> Router<PremiumAppState> {
    Router::new().nest("/api/premium", premium_routes())
}
