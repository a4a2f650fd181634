//! Donation handlers.
//!
//! ## Commands
//! - Opening a checkout session with the processor
//! - Ingesting processor status callbacks
//!
//! ## Queries
//! - Get a donation by invoice number

mod errors;
mod get_donation;
mod ingest_webhook;
mod initiate_checkout;

// Commands
pub use ingest_webhook::{IngestWebhookCommand, IngestWebhookHandler, IngestWebhookResult};
pub use initiate_checkout::{
    CheckoutOptions, InitiateCheckoutCommand, InitiateCheckoutHandler, InitiateCheckoutResult,
};

// Queries
pub use get_donation::{GetDonationHandler, GetDonationQuery, GetDonationResult};
