//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Data Service Ports
//!
//! - `PremiumCodeRepository` - Code lookup and conditional redemption
//! - `PremiumStatusReader` - Per-user premium status lookup
//!
//! ## Client Ports
//!
//! - `IdentityStore` - Local persistence of the visitor identifier

mod identity_store;
mod premium_code_repository;
mod premium_status_reader;

pub use identity_store::{IdentityStore, IdentityStoreError};
pub use premium_code_repository::{PremiumCodeRepository, RedemptionOutcome};
pub use premium_status_reader::PremiumStatusReader;
