//! Premium API client - redeems codes and checks status for the local visitor.
//!
//! The visitor identity comes from an [`IdentityProvider`], so callers only
//! supply the code. Blank codes are rejected locally without a request.
//!
//! # Configuration
//!
//! ```ignore
//! let config = PremiumApiConfig::new("https://api.example.com")
//!     .with_api_key(publishable_key)
//!     .with_timeout(Duration::from_secs(10));
//!
//! let client = PremiumApiClient::new(config, identity)?;
//! client.redeem("free2024").await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use thiserror::Error;

use crate::adapters::http::premium::{
    ErrorResponse, PremiumStatusRequest, PremiumStatusResponse, RedeemCodeRequest,
    RedeemCodeResponse,
};
use crate::application::IdentityProvider;
use crate::ports::IdentityStoreError;

/// Shown when the user submits an empty code.
pub const EMPTY_CODE_MESSAGE: &str = "Please enter a premium code";

/// Errors surfaced to the client UI.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{}", EMPTY_CODE_MESSAGE)]
    EmptyCode,

    /// The server answered with an error body; `message` is its `error` field.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Identity unavailable: {0}")]
    Identity(#[from] IdentityStoreError),

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

/// Configuration for the premium API client.
#[derive(Debug, Clone)]
pub struct PremiumApiConfig {
    /// Base URL of the premium service, without the `/api/premium` suffix.
    pub base_url: String,
    /// Publishable key sent as `apikey` and bearer token.
    api_key: Option<Secret<String>>,
    /// Request timeout.
    pub timeout: Duration,
}

impl PremiumApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the premium redeem/status endpoints.
pub struct PremiumApiClient {
    config: PremiumApiConfig,
    client: Client,
    identity: Arc<IdentityProvider>,
}

impl PremiumApiClient {
    pub fn new(
        config: PremiumApiConfig,
        identity: Arc<IdentityProvider>,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            identity,
        })
    }

    /// Redeem `code` for the local visitor.
    ///
    /// The code is trimmed before sending; the server normalizes case.
    pub async fn redeem(&self, code: &str) -> Result<RedeemCodeResponse, ClientError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ClientError::EmptyCode);
        }

        let user_id = self.identity.get_or_create_id().await?;
        let body = RedeemCodeRequest {
            code: Some(code.to_string()),
            user_id: Some(user_id.into_inner()),
        };

        let response = self.post("redeem", &body).await?;
        let result: RedeemCodeResponse = Self::read_success(response).await?;
        tracing::info!("Premium activated for local visitor");
        Ok(result)
    }

    /// Whether the local visitor currently holds premium status.
    pub async fn is_premium(&self) -> Result<bool, ClientError> {
        let user_id = self.identity.get_or_create_id().await?;
        let body = PremiumStatusRequest {
            user_id: Some(user_id.into_inner()),
        };

        let response = self.post("status", &body).await?;
        let status: PremiumStatusResponse = Self::read_success(response).await?;
        Ok(status.is_premium)
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/api/premium/{}", self.config.base_url, action)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request
                .header("apikey", key.expose_secret())
                .header("Authorization", format!("Bearer {}", key.expose_secret())),
            None => request,
        }
    }

    async fn post<T: Serialize>(&self, action: &str, body: &T) -> Result<Response, ClientError> {
        self.authorize(self.client.post(self.endpoint(action)))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    ClientError::Network(format!("Connection failed: {}", e))
                } else {
                    ClientError::Network(e.to_string())
                }
            })
    }

    async fn read_success<T: serde::de::DeserializeOwned>(
        response: Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ClientError::InvalidResponse(e.to_string()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|body| body.error)
            .unwrap_or(text);

        tracing::warn!(status = status.as_u16(), "Premium request rejected: {}", message);
        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
