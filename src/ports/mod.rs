//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `DonationLedger` - Donation records and their status changes
//! - `CheckoutGateway` - Signed create-payment calls to the processor
//! - `WebhookAuditLog` - Outcome of every inbound callback

mod checkout_gateway;
mod donation_ledger;
mod webhook_audit_log;

pub use checkout_gateway::{CheckoutGateway, GatewayError, GatewayResponse, SignedPaymentRequest};
pub use donation_ledger::{ApplyOutcome, DonationLedger, LedgerError, SaveResult};
pub use webhook_audit_log::{
    AuditLogError, AuditOutcome, WebhookAuditEntry, WebhookAuditLog, REJECTED_PAYLOAD_PREVIEW_BYTES,
};
