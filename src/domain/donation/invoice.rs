//! Invoice numbers.
//!
//! The invoice number is the only key shared between the checkout call and
//! the processor's later callback. Generated numbers look like
//! `DON-1704067200000-0001-48213`: millisecond clock, a process-wide sequence
//! and a random suffix. The sequence alone makes numbers unique within one
//! process; the suffix separates concurrent processes.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use uuid::Uuid;

use crate::domain::foundation::{Timestamp, ValidationError};

/// Longest invoice number the processor accepts.
pub const MAX_INVOICE_NUMBER_LEN: usize = 64;

/// Correlation key for a donation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    /// Validates an externally supplied invoice number.
    ///
    /// # Errors
    ///
    /// Empty, longer than 64 characters, or containing anything other than
    /// ASCII letters, digits, `-` and `_`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("invoice_number"));
        }
        if trimmed.len() > MAX_INVOICE_NUMBER_LEN {
            return Err(ValidationError::invalid_format(
                "invoice_number",
                format!("longer than {} characters", MAX_INVOICE_NUMBER_LEN),
            ));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ValidationError::invalid_format(
                "invoice_number",
                "only letters, digits, '-' and '_' are allowed",
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for InvoiceNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Mints invoice numbers that never repeat within a process.
#[derive(Debug)]
pub struct InvoiceNumberGenerator {
    prefix: String,
    sequence: AtomicU64,
}

impl InvoiceNumberGenerator {
    pub fn new() -> Self {
        Self::with_prefix("DON")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            sequence: AtomicU64::new(1),
        }
    }

    pub fn next(&self) -> InvoiceNumber {
        self.next_at(Timestamp::now())
    }

    /// Mints a number stamped with the given clock reading.
    pub fn next_at(&self, now: Timestamp) -> InvoiceNumber {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let suffix = Uuid::new_v4().as_u128() % 100_000;

        InvoiceNumber(format!(
            "{}-{}-{:04}-{:05}",
            self.prefix,
            now.as_unix_millis(),
            sequence,
            suffix
        ))
    }
}

impl Default for InvoiceNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
