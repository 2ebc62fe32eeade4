//! HTTP adapters - REST API implementations.
//!
//! The premium module owns its endpoints; `router` assembles them with the
//! health probe and shared middleware.

pub mod middleware;
pub mod premium;
pub mod router;

pub use premium::{premium_router, PremiumAppState};
pub use router::app_router;
