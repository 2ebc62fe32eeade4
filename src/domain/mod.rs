//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `premium` - Premium codes, premium status and the redemption error taxonomy

pub mod foundation;
pub mod premium;
