//! In-Memory Donation Ledger Adapter
//!
//! Process-local ledger. Records are lost on restart; durable storage is a
//! separate `DonationLedger` implementation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::donation::{DonationRecord, DonationStatus, InvoiceNumber};
use crate::domain::foundation::Transition;
use crate::ports::{ApplyOutcome, DonationLedger, LedgerError, SaveResult};

/// In-memory donation ledger
#[derive(Debug, Clone, Default)]
pub struct InMemoryDonationLedger {
    records: Arc<RwLock<HashMap<InvoiceNumber, DonationRecord>>>,
}

impl InMemoryDonationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl DonationLedger for InMemoryDonationLedger {
    async fn upsert_created(&self, record: DonationRecord) -> Result<SaveResult, LedgerError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.invoice_number) {
            return Ok(SaveResult::AlreadyExists);
        }
        records.insert(record.invoice_number.clone(), record);
        Ok(SaveResult::Inserted)
    }

    async fn apply_status(
        &self,
        invoice_number: &InvoiceNumber,
        status: DonationStatus,
    ) -> Result<ApplyOutcome, LedgerError> {
        // Write lock held across check and update keeps each invoice's
        // transitions serialized.
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(invoice_number) else {
            return Ok(ApplyOutcome::NotFound);
        };

        let current = record.status;
        Ok(match record.apply_status(status) {
            Ok(Transition::Moved { from, to }) => ApplyOutcome::Applied { from, to },
            Ok(Transition::Unchanged(status)) => ApplyOutcome::Unchanged(status),
            Err(_) => ApplyOutcome::Refused {
                current,
                attempted: status,
            },
        })
    }

    async fn get(
        &self,
        invoice_number: &InvoiceNumber,
    ) -> Result<Option<DonationRecord>, LedgerError> {
        Ok(self.records.read().await.get(invoice_number).cloned())
    }
}
