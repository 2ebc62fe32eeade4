//! Top-level router assembly.
//!
//! Mounts the premium endpoints and `/health`, then wraps everything in the
//! shared middleware stack: request ids, tracing, timeout, and CORS.

use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::middleware::cors_layer;
use super::premium::{premium_router, PremiumAppState};

/// Build the full application router.
pub fn app_router(state: PremiumAppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(premium_router())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(server.request_timeout()))
                .layer(cors_layer(&server.cors_origins_list())),
        )
}

/// GET /health - Liveness probe
async fn health() -> &'static str {
    "ok"
}
