//! Identity handlers.
//!
//! Client-side get-or-create of the opaque visitor identifier.

mod identity_provider;

pub use identity_provider::IdentityProvider;
