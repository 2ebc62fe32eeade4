//! In-memory adapters for the premium data service.
//!
//! Backs development runs (`storage.backend = memory`) and tests.

mod in_memory_premium_store;

pub use in_memory_premium_store::InMemoryPremiumStore;
