//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod donation;

pub use donation::{
    CheckoutOptions, GetDonationHandler, GetDonationQuery, GetDonationResult,
    IngestWebhookCommand, IngestWebhookHandler, IngestWebhookResult, InitiateCheckoutCommand,
    InitiateCheckoutHandler, InitiateCheckoutResult,
};
