//! WebhookAuditLog port - Records the true outcome of every callback.
//!
//! The HTTP boundary always acknowledges callbacks with 200, so this log is
//! the only place where a forged or orphaned callback can be told apart from
//! an applied one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::signing::body_digest;

/// Bytes of an unauthenticated body kept in its audit entry.
pub const REJECTED_PAYLOAD_PREVIEW_BYTES: usize = 256;

/// What happened to a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    /// Verified and the status changed.
    Applied,
    /// Verified; record already had this status.
    Duplicate,
    /// Verified; the status change was refused by the state machine.
    Refused,
    /// Verified; no record for the invoice number.
    Orphan,
    /// Verified; body was not valid JSON.
    Unparseable,
    /// Failed verification; ledger not touched.
    Rejected,
}

impl AuditOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditOutcome::Applied => "applied",
            AuditOutcome::Duplicate => "duplicate",
            AuditOutcome::Refused => "refused",
            AuditOutcome::Orphan => "orphan",
            AuditOutcome::Unparseable => "unparseable",
            AuditOutcome::Rejected => "rejected",
        }
    }
}

/// One audited callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookAuditEntry {
    pub received_at: DateTime<Utc>,
    pub outcome: AuditOutcome,
    /// Whether the callback passed verification.
    pub authenticated: bool,
    pub invoice_number: Option<String>,
    pub reported_status: Option<String>,
    /// Rejection or refusal detail.
    pub detail: Option<String>,
    /// `SHA-256=` digest of the body as received.
    pub body_digest: String,
    /// Body size in bytes.
    pub body_len: usize,
    /// Body lossily decoded as UTF-8. Unauthenticated bodies are cut to
    /// [`REJECTED_PAYLOAD_PREVIEW_BYTES`].
    pub payload: String,
}

impl WebhookAuditEntry {
    /// A verified callback.
    pub fn verified(
        outcome: AuditOutcome,
        invoice_number: Option<String>,
        reported_status: Option<String>,
        payload: &[u8],
    ) -> Self {
        Self {
            received_at: Utc::now(),
            outcome,
            authenticated: true,
            invoice_number,
            reported_status,
            detail: None,
            body_digest: body_digest(payload),
            body_len: payload.len(),
            payload: String::from_utf8_lossy(payload).into_owned(),
        }
    }

    /// A callback that failed verification.
    pub fn rejected(reason: impl Into<String>, payload: &[u8]) -> Self {
        Self {
            received_at: Utc::now(),
            outcome: AuditOutcome::Rejected,
            authenticated: false,
            invoice_number: None,
            reported_status: None,
            detail: Some(reason.into()),
            body_digest: body_digest(payload),
            body_len: payload.len(),
            payload: preview(payload, REJECTED_PAYLOAD_PREVIEW_BYTES),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

fn preview(payload: &[u8], limit: usize) -> String {
    let head = &payload[..payload.len().min(limit)];
    let mut text = String::from_utf8_lossy(head).into_owned();
    if text.ends_with(char::REPLACEMENT_CHARACTER) && head.len() < payload.len() {
        // cut landed inside a multi-byte character
        text.pop();
    }
    text
}

/// Errors from an audit sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditLogError {
    #[error("Audit log unavailable: {0}")]
    Unavailable(String),
}

/// Port for recording callback outcomes.
#[async_trait]
pub trait WebhookAuditLog: Send + Sync {
    /// Append an entry.
    ///
    /// # Errors
    ///
    /// Returns `AuditLogError` if the sink is unavailable.
    async fn record(&self, entry: WebhookAuditEntry) -> Result<(), AuditLogError>;
}
