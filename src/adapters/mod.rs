//! Adapters - Implementations of ports for specific technologies.
//!
//! - `doku` - Payment processor client and its test double
//! - `storage` - In-memory ledger and audit log
//! - `http` - Axum routes for checkout and callbacks

pub mod doku;
pub mod http;
pub mod storage;

pub use doku::{DokuCheckoutClient, DokuConfig, MockCheckoutGateway};
pub use storage::{InMemoryDonationLedger, InMemoryWebhookAuditLog};
