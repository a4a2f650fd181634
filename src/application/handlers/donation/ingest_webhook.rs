//! IngestWebhookHandler - Command handler for processor status callbacks.
//!
//! Callers always acknowledge the sender; the returned outcome and the audit
//! log carry the real result.

use std::sync::Arc;

use crate::domain::donation::{extract_notification, DonationError, InvoiceNumber};
use crate::domain::signing::{CanonicalVerifier, SecurityHeaders};
use crate::ports::{
    ApplyOutcome, AuditOutcome, DonationLedger, WebhookAuditEntry, WebhookAuditLog,
};

/// Command to ingest one callback.
#[derive(Debug, Clone)]
pub struct IngestWebhookCommand {
    pub headers: SecurityHeaders,
    /// Body exactly as received.
    pub raw_body: Vec<u8>,
}

/// Result of an authenticated callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestWebhookResult {
    /// Ledger status changed.
    Applied {
        invoice_number: InvoiceNumber,
        outcome: ApplyOutcome,
    },
    /// Status already recorded.
    Duplicate { invoice_number: InvoiceNumber },
    /// State machine refused the change; record untouched.
    Refused {
        invoice_number: InvoiceNumber,
        outcome: ApplyOutcome,
    },
    /// No matching donation; nothing created.
    Orphan { invoice_number: Option<String> },
    /// Body is not JSON.
    Unparseable,
}

/// Handler for processor callbacks.
///
/// Verification runs on the raw bytes before any parsing; a callback that
/// fails it never reaches the ledger.
pub struct IngestWebhookHandler {
    verifier: CanonicalVerifier,
    ledger: Arc<dyn DonationLedger>,
    audit_log: Arc<dyn WebhookAuditLog>,
}

impl IngestWebhookHandler {
    pub fn new(
        verifier: CanonicalVerifier,
        ledger: Arc<dyn DonationLedger>,
        audit_log: Arc<dyn WebhookAuditLog>,
    ) -> Self {
        Self {
            verifier,
            ledger,
            audit_log,
        }
    }

    /// # Errors
    ///
    /// - `AuthenticationFailure` when verification fails
    /// - `Infrastructure` when the ledger is unavailable
    pub async fn handle(
        &self,
        cmd: IngestWebhookCommand,
    ) -> Result<IngestWebhookResult, DonationError> {
        // 1. Authenticate the raw bytes
        let verification = self.verifier.verify(&cmd.headers, &cmd.raw_body);
        if let Some(rejection) = verification.rejection {
            tracing::warn!(
                rejection = rejection.code(),
                digest_ok = verification.digest_ok,
                signature_ok = verification.signature_ok,
                "Webhook failed verification"
            );
            self.audit(WebhookAuditEntry::rejected(rejection.to_string(), &cmd.raw_body))
                .await;
            return Err(DonationError::AuthenticationFailure(rejection));
        }

        // 2. Parse
        let body: serde_json::Value = match serde_json::from_slice(&cmd.raw_body) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "Authenticated webhook body is not JSON");
                self.audit(
                    WebhookAuditEntry::verified(AuditOutcome::Unparseable, None, None, &cmd.raw_body)
                        .with_detail(e.to_string()),
                )
                .await;
                return Ok(IngestWebhookResult::Unparseable);
            }
        };
        let notification = extract_notification(&body);

        // 3. Resolve invoice
        let parsed = notification
            .invoice_number
            .as_deref()
            .and_then(|raw| InvoiceNumber::new(raw).ok());
        let invoice_number = match parsed {
            Some(invoice_number) => invoice_number,
            None => {
                return Ok(self
                    .orphan(
                        notification.invoice_number,
                        notification.reported_status,
                        &cmd.raw_body,
                    )
                    .await)
            }
        };

        // 4. Apply
        let outcome = self
            .ledger
            .apply_status(&invoice_number, notification.status)
            .await?;

        tracing::info!(
            invoice_number = %invoice_number,
            status = %notification.status,
            reported_status = %notification.reported_status,
            outcome = ?outcome,
            "Webhook processed"
        );

        let result = match outcome {
            ApplyOutcome::NotFound => {
                return Ok(self
                    .orphan(
                        Some(invoice_number.to_string()),
                        notification.reported_status,
                        &cmd.raw_body,
                    )
                    .await)
            }
            ApplyOutcome::Applied { .. } => IngestWebhookResult::Applied {
                invoice_number: invoice_number.clone(),
                outcome,
            },
            ApplyOutcome::Unchanged(_) => IngestWebhookResult::Duplicate {
                invoice_number: invoice_number.clone(),
            },
            ApplyOutcome::Refused { current, attempted } => {
                tracing::warn!(
                    invoice_number = %invoice_number,
                    current = %current,
                    attempted = %attempted,
                    "Refused status regression"
                );
                IngestWebhookResult::Refused {
                    invoice_number: invoice_number.clone(),
                    outcome,
                }
            }
        };

        let audit_outcome = match &result {
            IngestWebhookResult::Applied { .. } => AuditOutcome::Applied,
            IngestWebhookResult::Refused { .. } => AuditOutcome::Refused,
            _ => AuditOutcome::Duplicate,
        };
        let mut entry = WebhookAuditEntry::verified(
            audit_outcome,
            Some(invoice_number.to_string()),
            Some(notification.reported_status),
            &cmd.raw_body,
        );
        if let IngestWebhookResult::Refused {
            outcome: ApplyOutcome::Refused { current, attempted },
            ..
        } = &result
        {
            entry = entry.with_detail(format!("{} -> {} refused", current, attempted));
        }
        self.audit(entry).await;

        Ok(result)
    }

    async fn orphan(
        &self,
        invoice_number: Option<String>,
        reported_status: String,
        raw_body: &[u8],
    ) -> IngestWebhookResult {
        tracing::warn!(
            invoice_number = invoice_number.as_deref().unwrap_or("-"),
            reported_status = %reported_status,
            "Webhook for unknown donation"
        );
        self.audit(WebhookAuditEntry::verified(
            AuditOutcome::Orphan,
            invoice_number.clone(),
            Some(reported_status),
            raw_body,
        ))
        .await;
        IngestWebhookResult::Orphan { invoice_number }
    }

    /// Audit failures are logged and otherwise ignored.
    async fn audit(&self, entry: WebhookAuditEntry) {
        if let Err(e) = self.audit_log.record(entry).await {
            tracing::warn!(error = %e, "Failed to record webhook audit entry");
        }
    }
}
