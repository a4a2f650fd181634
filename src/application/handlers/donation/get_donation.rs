//! GetDonationHandler - Query handler for a single donation record.

use std::sync::Arc;

use crate::domain::donation::{DonationError, DonationRecord, InvoiceNumber};
use crate::ports::DonationLedger;

/// Query for a donation by invoice number.
#[derive(Debug, Clone)]
pub struct GetDonationQuery {
    pub invoice_number: String,
}

pub type GetDonationResult = DonationRecord;

/// Handler for reading donation records.
pub struct GetDonationHandler {
    ledger: Arc<dyn DonationLedger>,
}

impl GetDonationHandler {
    pub fn new(ledger: Arc<dyn DonationLedger>) -> Self {
        Self { ledger }
    }

    /// # Errors
    ///
    /// `NotFound` for unknown or malformed invoice numbers.
    pub async fn handle(&self, query: GetDonationQuery) -> Result<GetDonationResult, DonationError> {
        let invoice_number = InvoiceNumber::new(query.invoice_number.as_str())
            .map_err(|_| DonationError::not_found(query.invoice_number.clone()))?;

        self.ledger
            .get(&invoice_number)
            .await?
            .ok_or_else(|| DonationError::not_found(query.invoice_number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryDonationLedger;
    use crate::domain::donation::{Amount, DonationDraft, DonationStatus, DonorInfo};
    use crate::ports::{ApplyOutcome, LedgerError, SaveResult};
    use async_trait::async_trait;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementation
    // ════════════════════════════════════════════════════════════════════════════

    struct FailingLedger;

    #[async_trait]
    impl DonationLedger for FailingLedger {
        async fn upsert_created(&self, _record: DonationRecord) -> Result<SaveResult, LedgerError> {
            Err(LedgerError::Unavailable("simulated read failure".into()))
        }

        async fn apply_status(
            &self,
            _invoice_number: &InvoiceNumber,
            _status: DonationStatus,
        ) -> Result<ApplyOutcome, LedgerError> {
            Err(LedgerError::Unavailable("simulated read failure".into()))
        }

        async fn get(
            &self,
            _invoice_number: &InvoiceNumber,
        ) -> Result<Option<DonationRecord>, LedgerError> {
            Err(LedgerError::Unavailable("simulated read failure".into()))
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn returns_record_when_exists() {
        let ledger = Arc::new(InMemoryDonationLedger::new());
        ledger
            .upsert_created(DonationRecord::created(
                DonationDraft {
                    invoice_number: InvoiceNumber::new("DON-1").unwrap(),
                    amount: Amount::new(25_000).unwrap(),
                    donor: DonorInfo::anonymous(),
                    frequency: "monthly".into(),
                },
                None,
            ))
            .await
            .unwrap();
        let handler = GetDonationHandler::new(ledger);

        let record = handler
            .handle(GetDonationQuery {
                invoice_number: "DON-1".into(),
            })
            .await
            .unwrap();

        assert_eq!(record.amount.value(), 25_000);
        assert_eq!(record.frequency, "monthly");
    }

    #[tokio::test]
    async fn unknown_invoice_is_not_found() {
        let handler = GetDonationHandler::new(Arc::new(InMemoryDonationLedger::new()));

        let result = handler
            .handle(GetDonationQuery {
                invoice_number: "DON-404".into(),
            })
            .await;

        assert_eq!(result, Err(DonationError::not_found("DON-404")));
    }

    #[tokio::test]
    async fn malformed_invoice_is_not_found() {
        let handler = GetDonationHandler::new(Arc::new(InMemoryDonationLedger::new()));

        let result = handler
            .handle(GetDonationQuery {
                invoice_number: "../etc/passwd".into(),
            })
            .await;

        assert!(matches!(result, Err(DonationError::NotFound(_))));
    }

    #[tokio::test]
    async fn ledger_failure_is_infrastructure_error() {
        let handler = GetDonationHandler::new(Arc::new(FailingLedger));

        let result = handler
            .handle(GetDonationQuery {
                invoice_number: "DON-1".into(),
            })
            .await;

        assert!(matches!(result, Err(DonationError::Infrastructure(_))));
    }
}
