//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (checkout, webhook ingestion) write to the ledger; the
//! query handler only reads from it.

pub mod handlers;

pub use handlers::{
    CheckoutOptions, GetDonationHandler, GetDonationQuery, GetDonationResult,
    IngestWebhookCommand, IngestWebhookHandler, IngestWebhookResult, InitiateCheckoutCommand,
    InitiateCheckoutHandler, InitiateCheckoutResult,
};
