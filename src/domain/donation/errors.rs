//! Donation error taxonomy.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Configuration | 503 |
//! | InvalidAmount | 400 |
//! | Validation | 400 |
//! | UpstreamUnavailable | 502 |
//! | UpstreamContractViolation | 502 |
//! | AuthenticationFailure | 401 (never sent to webhook callers) |
//! | NotFound | 404 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::signing::{Rejection, SigningError};

/// Errors surfaced by donation operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DonationError {
    /// Credentials are missing or unusable; signing cannot proceed.
    #[error("Payment gateway is not configured: {0}")]
    Configuration(String),

    /// Donation amount is not a positive whole number.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Some other input failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Processor unreachable, timed out, or answered non-2xx.
    #[error("Payment processor unavailable: {reason}")]
    UpstreamUnavailable { reason: String, status: Option<u16> },

    /// Processor answered 2xx without a usable checkout URL.
    #[error("Payment processor response did not include a checkout URL")]
    UpstreamContractViolation { raw: serde_json::Value },

    /// Callback digest, signature or timestamp failed verification.
    #[error("Webhook authentication failed: {0}")]
    AuthenticationFailure(Rejection),

    /// No donation for this invoice number.
    #[error("Donation not found: {0}")]
    NotFound(String),

    /// Storage or audit sink failure.
    #[error("Internal error: {0}")]
    Infrastructure(String),
}

impl DonationError {
    pub fn configuration(message: impl Into<String>) -> Self {
        DonationError::Configuration(message.into())
    }

    pub fn invalid_amount(detail: impl Into<String>) -> Self {
        DonationError::InvalidAmount(detail.into())
    }

    pub fn upstream_unavailable(reason: impl Into<String>, status: Option<u16>) -> Self {
        DonationError::UpstreamUnavailable {
            reason: reason.into(),
            status,
        }
    }

    pub fn contract_violation(raw: serde_json::Value) -> Self {
        DonationError::UpstreamContractViolation { raw }
    }

    pub fn not_found(invoice_number: impl Into<String>) -> Self {
        DonationError::NotFound(invoice_number.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        DonationError::Infrastructure(message.into())
    }

    /// Stable error code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            DonationError::Configuration(_) => "GATEWAY_NOT_CONFIGURED",
            DonationError::InvalidAmount(_) => "INVALID_AMOUNT",
            DonationError::Validation(_) => "VALIDATION_FAILED",
            DonationError::UpstreamUnavailable { .. } => "UPSTREAM_UNAVAILABLE",
            DonationError::UpstreamContractViolation { .. } => "UPSTREAM_CONTRACT_VIOLATION",
            DonationError::AuthenticationFailure(_) => "AUTHENTICATION_FAILED",
            DonationError::NotFound(_) => "DONATION_NOT_FOUND",
            DonationError::Infrastructure(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the caller may safely retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DonationError::UpstreamUnavailable { .. } | DonationError::Infrastructure(_)
        )
    }
}

impl From<SigningError> for DonationError {
    fn from(err: SigningError) -> Self {
        DonationError::Configuration(err.to_string())
    }
}

impl From<ValidationError> for DonationError {
    fn from(err: ValidationError) -> Self {
        DonationError::Validation(err.to_string())
    }
}
