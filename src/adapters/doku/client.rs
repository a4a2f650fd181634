//! DOKU Checkout adapter.
//!
//! Implements `CheckoutGateway` by POSTing already-signed payment requests to
//! the processor. The body is sent exactly as signed.
//!
//! # Configuration
//!
//! ```ignore
//! let config = DokuConfig::new("https://api-sandbox.doku.com").with_timeout_secs(20);
//! let client = DokuCheckoutClient::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::ports::{CheckoutGateway, GatewayError, GatewayResponse, SignedPaymentRequest};

/// Default processor base URL (sandbox).
pub const DEFAULT_BASE_URL: &str = "https://api-sandbox.doku.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Processor connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DokuConfig {
    /// Scheme and host, without a trailing slash.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl DokuConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Absolute URL for a request target such as `/checkout/v1/payment`.
    pub fn url_for(&self, request_target: &str) -> String {
        format!("{}{}", self.base_url, request_target)
    }
}

impl Default for DokuConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// HTTP client for the processor's checkout API.
#[derive(Debug, Clone)]
pub struct DokuCheckoutClient {
    config: DokuConfig,
    http_client: reqwest::Client,
}

impl DokuCheckoutClient {
    /// # Errors
    ///
    /// `GatewayError::Network` if the HTTP client cannot be built.
    pub fn new(config: DokuConfig) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &DokuConfig {
        &self.config
    }

    fn map_send_error(&self, error: reqwest::Error) -> GatewayError {
        if error.is_timeout() {
            GatewayError::Timeout(self.config.timeout_secs)
        } else {
            GatewayError::Network(error.to_string())
        }
    }
}

#[async_trait]
impl CheckoutGateway for DokuCheckoutClient {
    async fn submit_payment(
        &self,
        request: SignedPaymentRequest,
    ) -> Result<GatewayResponse, GatewayError> {
        let url = self.config.url_for(&request.headers.request_target);

        let mut builder = self
            .http_client
            .post(&url)
            .header(CONTENT_TYPE, "application/json");
        for (name, value) in request.headers.pairs() {
            builder = builder.header(name, value);
        }

        tracing::debug!(
            url = %url,
            request_id = %request.headers.request_id,
            body_len = request.body.len(),
            "Submitting checkout payment"
        );

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                body = %text,
                "Processor rejected checkout payment"
            );
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        let body = serde_json::from_str(&text).map_err(|e| {
            tracing::error!(error = %e, body = %text, "Processor returned non-JSON body");
            GatewayError::InvalidResponse {
                status: status.as_u16(),
                raw: text.clone(),
            }
        })?;

        Ok(GatewayResponse {
            status: status.as_u16(),
            body,
        })
    }
}
