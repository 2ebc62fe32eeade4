//! Storage Adapters
//!
//! Implementations of the IdentityStore port for the visitor identifier.
//!
//! ## Available Adapters
//!
//! - **FileIdentityStore** - Stores the identifier as a YAML file on disk
//! - **InMemoryIdentityStore** - Stores the identifier in memory (testing/short-lived clients)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileIdentityStore, InMemoryIdentityStore};
//!
//! // Persistent client identity
//! let store = FileIdentityStore::new("./data/identity.yaml");
//!
//! // Testing
//! let store = InMemoryIdentityStore::new();
//! ```

mod file_identity_store;
mod in_memory_identity_store;

pub use file_identity_store::FileIdentityStore;
pub use in_memory_identity_store::InMemoryIdentityStore;
