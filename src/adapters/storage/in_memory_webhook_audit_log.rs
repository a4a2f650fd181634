//! In-Memory Webhook Audit Log Adapter
//!
//! Keeps the most recent audit entries in memory and mirrors each one to the
//! tracing subscriber, so log shipping picks up callback outcomes too. Once
//! the capacity is reached the oldest entry is dropped.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{AuditLogError, AuditOutcome, WebhookAuditEntry, WebhookAuditLog};

/// Entries kept by [`InMemoryWebhookAuditLog::new`].
pub const DEFAULT_AUDIT_CAPACITY: usize = 10_000;

/// In-memory webhook audit log
#[derive(Debug, Clone)]
pub struct InMemoryWebhookAuditLog {
    entries: Arc<RwLock<VecDeque<WebhookAuditEntry>>>,
    capacity: usize,
}

impl InMemoryWebhookAuditLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_AUDIT_CAPACITY)
    }

    /// Keep at most `capacity` entries (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(capacity.min(1024)))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Retained entries, oldest first
    pub async fn entries(&self) -> Vec<WebhookAuditEntry> {
        self.entries.read().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Entries recorded for one invoice number
    pub async fn for_invoice(&self, invoice_number: &str) -> Vec<WebhookAuditEntry> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|e| e.invoice_number.as_deref() == Some(invoice_number))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl WebhookAuditLog for InMemoryWebhookAuditLog {
    async fn record(&self, entry: WebhookAuditEntry) -> Result<(), AuditLogError> {
        match entry.outcome {
            AuditOutcome::Rejected | AuditOutcome::Refused => tracing::warn!(
                outcome = entry.outcome.as_str(),
                authenticated = entry.authenticated,
                invoice_number = entry.invoice_number.as_deref().unwrap_or("-"),
                detail = entry.detail.as_deref().unwrap_or("-"),
                "Webhook audit"
            ),
            _ => tracing::info!(
                outcome = entry.outcome.as_str(),
                invoice_number = entry.invoice_number.as_deref().unwrap_or("-"),
                reported_status = entry.reported_status.as_deref().unwrap_or("-"),
                "Webhook audit"
            ),
        }

        let mut entries = self.entries.write().await;
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
        Ok(())
    }
}

impl Default for InMemoryWebhookAuditLog {
    fn default() -> Self {
        Self::new()
    }
}
