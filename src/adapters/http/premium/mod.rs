//! HTTP adapter for premium endpoints.
//!
//! Exposes the premium domain via REST API:
//! - `POST /api/premium/redeem` - Redeem a one-time premium code
//! - `POST /api/premium/status` - Check whether a user holds premium status

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{PremiumApiError, PremiumAppState};
pub use routes::{premium_router, premium_routes};
