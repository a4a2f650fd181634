//! Donation records and their inputs.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateMachine, Timestamp, Transition, ValidationError};

use super::errors::DonationError;
use super::invoice::InvoiceNumber;
use super::status::DonationStatus;

pub const DEFAULT_DONOR_NAME: &str = "Anonymous Donor";
pub const DEFAULT_DONOR_EMAIL: &str = "anonymous@example.com";
pub const DEFAULT_DONOR_PHONE: &str = "081234567890";
pub const DEFAULT_FREQUENCY: &str = "one-time";

/// Positive donation amount in the currency's smallest whole unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// # Errors
    ///
    /// `DonationError::InvalidAmount` for zero or negative values.
    pub fn new(value: i64) -> Result<Self, DonationError> {
        if value <= 0 {
            return Err(DonationError::invalid_amount(format!(
                "amount must be greater than zero, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Accepts a JSON-style number; fractions, NaN and infinities are rejected.
    pub fn from_number(value: f64) -> Result<Self, DonationError> {
        if !value.is_finite() || value.fract() != 0.0 || value.abs() > i64::MAX as f64 {
            return Err(DonationError::invalid_amount(format!(
                "amount must be a whole number, got {}",
                value
            )));
        }
        Self::new(value as i64)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Amount as submitted by a client: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    /// # Errors
    ///
    /// `DonationError::InvalidAmount` unless the value is a positive whole
    /// number.
    pub fn parse(&self) -> Result<Amount, DonationError> {
        match self {
            RawAmount::Number(value) => Amount::from_number(*value),
            RawAmount::Text(text) => {
                let value: f64 = text.trim().parse().map_err(|_| {
                    DonationError::invalid_amount(format!("'{}' is not a number", text))
                })?;
                Amount::from_number(value)
            }
        }
    }
}

impl From<i64> for RawAmount {
    fn from(value: i64) -> Self {
        RawAmount::Number(value as f64)
    }
}

/// Optional donor contact details.
///
/// Blank strings are stored as `None`; the `*_or_default` accessors supply
/// the placeholders the processor requires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DonorInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl DonorInfo {
    pub fn new(name: Option<String>, email: Option<String>, phone: Option<String>) -> Self {
        Self {
            name: non_blank(name),
            email: non_blank(email),
            phone: non_blank(phone),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn name_or_default(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_DONOR_NAME)
    }

    pub fn email_or_default(&self) -> &str {
        self.email.as_deref().unwrap_or(DEFAULT_DONOR_EMAIL)
    }

    pub fn phone_or_default(&self) -> &str {
        self.phone.as_deref().unwrap_or(DEFAULT_DONOR_PHONE)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A donation about to be submitted to the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationDraft {
    pub invoice_number: InvoiceNumber,
    pub amount: Amount,
    pub donor: DonorInfo,
    pub frequency: String,
}

/// A donation whose checkout session was opened.
///
/// Created once, after the processor returns a checkout URL. Only callbacks
/// change `status`, and records are never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonationRecord {
    pub invoice_number: InvoiceNumber,
    pub amount: Amount,
    pub donor: DonorInfo,
    pub frequency: String,
    pub status: DonationStatus,
    pub checkout_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DonationRecord {
    pub fn created(draft: DonationDraft, checkout_url: Option<String>) -> Self {
        let now = Timestamp::now();
        Self {
            invoice_number: draft.invoice_number,
            amount: draft.amount,
            donor: draft.donor,
            frequency: draft.frequency,
            status: DonationStatus::Created,
            checkout_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves to `status` if the state machine allows it.
    ///
    /// Repeating the current status leaves the record untouched, including
    /// `updated_at`.
    pub fn apply_status(
        &mut self,
        status: DonationStatus,
    ) -> Result<Transition<DonationStatus>, ValidationError> {
        let transition = self.status.transition_to(status)?;
        if let Transition::Moved { to, .. } = transition {
            self.status = to;
            self.updated_at = Timestamp::now();
        }
        Ok(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> DonationDraft {
        DonationDraft {
            invoice_number: InvoiceNumber::new("DON-1-0001-00001").unwrap(),
            amount: Amount::new(50_000).unwrap(),
            donor: DonorInfo::anonymous(),
            frequency: DEFAULT_FREQUENCY.to_string(),
        }
    }

    // ══════════════════════════════════════════════════════════════
    // Amount
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn zero_and_negative_amounts_are_invalid() {
        assert!(matches!(Amount::new(0), Err(DonationError::InvalidAmount(_))));
        assert!(matches!(Amount::new(-5), Err(DonationError::InvalidAmount(_))));
    }

    #[test]
    fn raw_amount_accepts_numeric_strings() {
        let amount = RawAmount::Text(" 50000 ".into()).parse().unwrap();
        assert_eq!(amount.value(), 50_000);
    }

    #[test]
    fn raw_amount_rejects_text_and_fractions() {
        assert!(matches!(
            RawAmount::Text("lots".into()).parse(),
            Err(DonationError::InvalidAmount(_))
        ));
        assert!(matches!(
            RawAmount::Text(String::new()).parse(),
            Err(DonationError::InvalidAmount(_))
        ));
        assert!(matches!(
            RawAmount::Number(10.5).parse(),
            Err(DonationError::InvalidAmount(_))
        ));
    }

    #[test]
    fn raw_amount_deserializes_number_or_string() {
        let number: RawAmount = serde_json::from_str("100000").unwrap();
        let text: RawAmount = serde_json::from_str("\"100000\"").unwrap();
        assert_eq!(number.parse().unwrap(), text.parse().unwrap());
    }

    #[test]
    fn positive_amount_is_kept() {
        assert_eq!(Amount::new(50_000).unwrap().value(), 50_000);
    }

    #[test]
    fn from_number_rejects_fractions_and_nan() {
        assert!(Amount::from_number(10.5).is_err());
        assert!(Amount::from_number(f64::NAN).is_err());
        assert!(Amount::from_number(f64::INFINITY).is_err());
        assert!(Amount::from_number(-1.0).is_err());
        assert_eq!(Amount::from_number(25_000.0).unwrap().value(), 25_000);
    }

    // ══════════════════════════════════════════════════════════════
    // Donor
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn blank_donor_fields_fall_back_to_defaults() {
        let donor = DonorInfo::new(Some("  ".to_string()), None, Some(String::new()));

        assert_eq!(donor.name, None);
        assert_eq!(donor.name_or_default(), DEFAULT_DONOR_NAME);
        assert_eq!(donor.email_or_default(), DEFAULT_DONOR_EMAIL);
        assert_eq!(donor.phone_or_default(), DEFAULT_DONOR_PHONE);
    }

    #[test]
    fn donor_fields_are_trimmed() {
        let donor = DonorInfo::new(Some(" Sari ".to_string()), None, None);
        assert_eq!(donor.name_or_default(), "Sari");
    }

    // ══════════════════════════════════════════════════════════════
    // Status Changes
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn new_record_starts_created() {
        let record = DonationRecord::created(draft(), Some("https://pay.example/x".into()));
        assert_eq!(record.status, DonationStatus::Created);
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn apply_status_moves_forward() {
        let mut record = DonationRecord::created(draft(), None);

        let transition = record.apply_status(DonationStatus::Success).unwrap();

        assert!(matches!(transition, Transition::Moved { .. }));
        assert_eq!(record.status, DonationStatus::Success);
        assert!(record.updated_at >= record.created_at);
    }

    #[test]
    fn apply_same_status_twice_is_idempotent() {
        let mut record = DonationRecord::created(draft(), None);
        record.apply_status(DonationStatus::Success).unwrap();
        let snapshot = record.clone();

        let transition = record.apply_status(DonationStatus::Success).unwrap();

        assert_eq!(transition, Transition::Unchanged(DonationStatus::Success));
        assert_eq!(record, snapshot);
    }

    #[test]
    fn regression_is_refused_and_record_untouched() {
        let mut record = DonationRecord::created(draft(), None);
        record.apply_status(DonationStatus::Success).unwrap();
        let snapshot = record.clone();

        let result = record.apply_status(DonationStatus::Pending);

        assert!(result.is_err());
        assert_eq!(record, snapshot);
    }
}
