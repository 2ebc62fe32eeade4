//! Premium Unlock - one-time premium code redemption
//!
//! Visitors redeem single-use codes to gain permanent premium status. The
//! server validates a code, consumes it for exactly one user, and records
//! that user's premium status; clients can then ask whether a user is
//! premium.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
