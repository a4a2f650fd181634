//! DonationLedger port - Authoritative store of donation records.
//!
//! Records are inserted once, after the processor opened a checkout session,
//! and afterwards only their status changes. Nothing is ever deleted.
//!
//! Mutations must be atomic per invoice number: two concurrent callbacks for
//! the same invoice are applied one after the other, never interleaved.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::donation::{DonationRecord, DonationStatus, InvoiceNumber};

/// Errors from a ledger backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
}

/// Result of inserting a freshly created record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    /// Record was inserted.
    Inserted,
    /// A record with this invoice number already exists and was left as is.
    AlreadyExists,
}

/// Result of applying a reported status to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Status changed.
    Applied {
        from: DonationStatus,
        to: DonationStatus,
    },
    /// Record already had this status; nothing changed.
    Unchanged(DonationStatus),
    /// The state machine does not allow this change; nothing changed.
    Refused {
        current: DonationStatus,
        attempted: DonationStatus,
    },
    /// No record for the invoice number.
    NotFound,
}

impl ApplyOutcome {
    /// Whether a record existed for the invoice number.
    pub fn found(&self) -> bool {
        !matches!(self, ApplyOutcome::NotFound)
    }
}

/// Port for the donation ledger.
#[async_trait]
pub trait DonationLedger: Send + Sync {
    /// Insert a record in CREATED state.
    ///
    /// An existing record with the same invoice number is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the backend is unavailable.
    async fn upsert_created(&self, record: DonationRecord) -> Result<SaveResult, LedgerError>;

    /// Apply a reported status to an existing record.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the backend is unavailable.
    async fn apply_status(
        &self,
        invoice_number: &InvoiceNumber,
        status: DonationStatus,
    ) -> Result<ApplyOutcome, LedgerError>;

    /// Fetch a record by invoice number.
    async fn get(&self, invoice_number: &InvoiceNumber)
        -> Result<Option<DonationRecord>, LedgerError>;

    /// Whether a record exists for the invoice number.
    async fn contains(&self, invoice_number: &InvoiceNumber) -> Result<bool, LedgerError> {
        Ok(self.get(invoice_number).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn donation_ledger_is_object_safe() {
        fn _accepts_dyn(_ledger: &dyn DonationLedger) {}
    }

    #[test]
    fn only_not_found_reports_missing() {
        assert!(!ApplyOutcome::NotFound.found());
        assert!(ApplyOutcome::Unchanged(DonationStatus::Success).found());
        assert!(ApplyOutcome::Refused {
            current: DonationStatus::Success,
            attempted: DonationStatus::Pending,
        }
        .found());
    }
}
