//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `client` - HTTP client for the premium endpoints (reqwest)
//! - `http` - REST API exposing redemption and status (axum)
//! - `memory` - In-process premium store for development and tests
//! - `postgres` - PostgreSQL premium store (sqlx)
//! - `storage` - Visitor identity persistence

pub mod client;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod storage;

pub use client::{ClientError, PremiumApiClient, PremiumApiConfig};
pub use http::{app_router, PremiumAppState};
pub use memory::InMemoryPremiumStore;
pub use postgres::{PostgresPremiumCodeRepository, PostgresPremiumStatusReader};
pub use storage::{FileIdentityStore, InMemoryIdentityStore};
