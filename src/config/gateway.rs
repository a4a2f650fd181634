//! Payment gateway configuration (DOKU)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::application::handlers::donation::CheckoutOptions;
use crate::domain::donation::PayloadOptions;
use crate::domain::signing::{FreshnessWindow, SigningCredential};

use super::error::ValidationError;

/// Payment gateway configuration
///
/// Empty credentials are allowed outside production: the service starts,
/// and every checkout fails with a configuration error.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Client-Id issued by the processor
    #[serde(default)]
    pub client_id: String,

    /// Shared secret for request signatures
    #[serde(default = "empty_secret")]
    pub secret_key: SecretString,

    /// Processor base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Create-payment endpoint path
    #[serde(default = "default_payment_path")]
    pub payment_path: String,

    /// Redirect override after successful payment
    pub success_url: Option<String>,

    /// Redirect override after failed payment
    pub failed_url: Option<String>,

    /// Callback override
    pub callback_url: Option<String>,

    /// Public origin for redirect and callback URLs
    pub public_base_url: Option<String>,

    /// Timeout for processor calls in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Minutes the donor has to complete payment
    #[serde(default = "default_payment_due_date")]
    pub payment_due_date: u32,

    /// Tag stored in payment metadata
    #[serde(default = "default_project")]
    pub project: String,

    /// ISO currency code, omitted from requests when unset
    pub currency: Option<String>,

    /// Path callbacks are delivered to
    #[serde(default = "default_webhook_path")]
    pub webhook_path: String,

    /// Oldest accepted callback timestamp, in seconds
    #[serde(default = "default_webhook_max_age")]
    pub webhook_max_age_secs: i64,

    /// Furthest-future accepted callback timestamp, in seconds
    #[serde(default = "default_webhook_max_skew")]
    pub webhook_max_skew_secs: i64,

    /// Reject callbacks outside the timestamp window
    #[serde(default = "default_enforce_freshness")]
    pub enforce_webhook_freshness: bool,
}

impl GatewayConfig {
    /// Whether the credential would be accepted by the signer
    pub fn has_credentials(&self) -> bool {
        self.credential().is_configured()
    }

    pub fn credential(&self) -> SigningCredential {
        SigningCredential::new(
            self.client_id.trim(),
            self.secret_key.expose_secret().as_str(),
        )
    }

    pub fn checkout_options(&self) -> CheckoutOptions {
        CheckoutOptions {
            payment_path: self.payment_path.clone(),
            webhook_path: self.webhook_path.clone(),
            success_url: non_blank(&self.success_url),
            failed_url: non_blank(&self.failed_url),
            callback_url: non_blank(&self.callback_url),
            payload: PayloadOptions {
                currency: non_blank(&self.currency),
                payment_due_date: self.payment_due_date,
                project: self.project.clone(),
            },
        }
    }

    /// `None` when freshness enforcement is off
    pub fn freshness_window(&self) -> Option<FreshnessWindow> {
        self.enforce_webhook_freshness.then(|| {
            FreshnessWindow::new(self.webhook_max_age_secs, self.webhook_max_skew_secs)
        })
    }

    /// Validate gateway configuration
    pub fn validate(&self, is_production: bool) -> Result<(), ValidationError> {
        if !is_http_url(&self.base_url) {
            return Err(ValidationError::InvalidBaseUrl("base_url"));
        }
        if let Some(url) = non_blank(&self.public_base_url) {
            if !is_http_url(&url) {
                return Err(ValidationError::InvalidBaseUrl("public_base_url"));
            }
        }
        if !self.payment_path.starts_with('/') {
            return Err(ValidationError::InvalidPath("payment_path"));
        }
        if !self.webhook_path.starts_with('/') {
            return Err(ValidationError::InvalidPath("webhook_path"));
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.webhook_max_age_secs <= 0 || self.webhook_max_skew_secs < 0 {
            return Err(ValidationError::InvalidFreshnessWindow);
        }

        if is_production {
            if self.client_id.trim().is_empty() {
                return Err(ValidationError::MissingRequired("DOKU client_id"));
            }
            if self.secret_key.expose_secret().trim().is_empty() {
                return Err(ValidationError::MissingRequired("DOKU secret_key"));
            }
            if !self.base_url.starts_with("https://") {
                return Err(ValidationError::BaseUrlMustBeHttps);
            }
        }

        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            secret_key: empty_secret(),
            base_url: default_base_url(),
            payment_path: default_payment_path(),
            success_url: None,
            failed_url: None,
            callback_url: None,
            public_base_url: None,
            request_timeout_secs: default_request_timeout(),
            payment_due_date: default_payment_due_date(),
            project: default_project(),
            currency: None,
            webhook_path: default_webhook_path(),
            webhook_max_age_secs: default_webhook_max_age(),
            webhook_max_skew_secs: default_webhook_max_skew(),
            enforce_webhook_freshness: default_enforce_freshness(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

fn default_base_url() -> String {
    "https://api-sandbox.doku.com".to_string()
}

fn default_payment_path() -> String {
    "/checkout/v1/payment".to_string()
}

fn default_request_timeout() -> u64 {
    20
}

fn default_payment_due_date() -> u32 {
    60
}

fn default_project() -> String {
    "TOA Cares".to_string()
}

fn default_webhook_path() -> String {
    "/api/webhooks/doku".to_string()
}

fn default_webhook_max_age() -> i64 {
    300
}

fn default_webhook_max_skew() -> i64 {
    60
}

fn default_enforce_freshness() -> bool {
    true
}
