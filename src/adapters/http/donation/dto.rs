//! HTTP DTOs (Data Transfer Objects) for donation endpoints.
//!
//! These types define the JSON request/response structure for the donation API.
//! Field names are camelCase to match the browser form that posts to us.

use serde::{Deserialize, Serialize};

use crate::application::handlers::donation::InitiateCheckoutResult;
use crate::domain::donation::{DonationError, DonationRecord, DonationStatus, RawAmount};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to start a donation checkout.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationRequest {
    /// Kept as raw JSON so a wrongly typed amount is reported as an
    /// amount error rather than a body rejection.
    #[serde(default)]
    pub amount: Option<serde_json::Value>,
    #[serde(default)]
    pub donor_name: Option<String>,
    #[serde(default)]
    pub donor_email: Option<String>,
    #[serde(default)]
    pub donor_phone: Option<String>,
    /// e.g. `one-time`, `monthly`.
    #[serde(default)]
    pub frequency: Option<String>,
}

impl CreateDonationRequest {
    /// The amount as a JSON number or numeric string.
    ///
    /// # Errors
    ///
    /// `InvalidAmount` when the field is absent, null, or any other JSON type.
    pub fn raw_amount(&self) -> Result<RawAmount, DonationError> {
        match &self.amount {
            None | Some(serde_json::Value::Null) => {
                Err(DonationError::invalid_amount("amount is required"))
            }
            Some(value) => serde_json::from_value(value.clone()).map_err(|_| {
                DonationError::invalid_amount(format!(
                    "expected a number or numeric string, got {}",
                    value
                ))
            }),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response after a checkout session was opened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationResponse {
    /// Processor-hosted page to redirect the donor to.
    pub checkout_url: String,
    pub invoice_number: String,
}

impl From<InitiateCheckoutResult> for CreateDonationResponse {
    fn from(result: InitiateCheckoutResult) -> Self {
        Self {
            checkout_url: result.checkout_url,
            invoice_number: result.invoice_number.to_string(),
        }
    }
}

/// A stored donation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DonationResponse {
    pub invoice_number: String,
    pub amount: i64,
    pub donor_name: Option<String>,
    pub donor_email: Option<String>,
    pub donor_phone: Option<String>,
    pub frequency: String,
    pub status: DonationStatus,
    pub checkout_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<DonationRecord> for DonationResponse {
    fn from(record: DonationRecord) -> Self {
        Self {
            invoice_number: record.invoice_number.to_string(),
            amount: record.amount.value(),
            donor_name: record.donor.name,
            donor_email: record.donor.email,
            donor_phone: record.donor.phone,
            frequency: record.frequency,
            status: record.status,
            checkout_url: record.checkout_url,
            created_at: record.created_at.to_rfc3339_secs(),
            updated_at: record.updated_at.to_rfc3339_secs(),
        }
    }
}

/// Acknowledgement returned for every webhook delivery.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookAckResponse {
    pub received: bool,
    /// Whether the callback passed verification.
    pub valid: bool,
}

impl WebhookAckResponse {
    pub fn new(valid: bool) -> Self {
        Self {
            received: true,
            valid,
        }
    }
}

/// Liveness check body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}
