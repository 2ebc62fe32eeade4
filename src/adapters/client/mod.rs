//! HTTP client adapters.
//!
//! - `premium_api_client` - Calls the premium endpoints on behalf of the local visitor

mod premium_api_client;

pub use premium_api_client::{ClientError, PremiumApiClient, PremiumApiConfig, EMPTY_CODE_MESSAGE};
