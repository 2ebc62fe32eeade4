//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresPremiumCodeRepository` - Code lookup and transactional redemption
//! - `PostgresPremiumStatusReader` - Premium status queries

mod premium_code_repository;
mod premium_status_reader;

pub use premium_code_repository::PostgresPremiumCodeRepository;
pub use premium_status_reader::PostgresPremiumStatusReader;
