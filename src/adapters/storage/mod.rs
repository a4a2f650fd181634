//! Storage Adapters
//!
//! Implementations of the `DonationLedger` and `WebhookAuditLog` ports.
//!
//! ## Available Adapters
//!
//! - **InMemoryDonationLedger** - Donation records in process memory
//! - **InMemoryWebhookAuditLog** - Callback outcomes in memory, mirrored to tracing
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryDonationLedger, InMemoryWebhookAuditLog};
//!
//! let ledger = Arc::new(InMemoryDonationLedger::new());
//! let audit_log = Arc::new(InMemoryWebhookAuditLog::new());
//! ```

mod in_memory_donation_ledger;
mod in_memory_webhook_audit_log;

pub use in_memory_donation_ledger::InMemoryDonationLedger;
pub use in_memory_webhook_audit_log::{InMemoryWebhookAuditLog, DEFAULT_AUDIT_CAPACITY};
