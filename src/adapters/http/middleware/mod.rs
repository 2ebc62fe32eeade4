//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `cors` - Browser cross-origin access for the premium endpoints

pub mod cors;

pub use cors::{cors_layer, ALLOWED_HEADERS};
