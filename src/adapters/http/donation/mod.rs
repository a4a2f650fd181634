//! HTTP adapter for donation checkout and processor callbacks.
//!
//! # Endpoints
//!
//! - `POST /api/donations` - Open a checkout session
//! - `GET /api/donations/:invoice_number` - Get a donation record
//! - `POST /api/webhooks/doku` - Processor status callback (always 200)
//! - `GET /health` - Liveness check

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{
    CreateDonationRequest, CreateDonationResponse, DonationResponse, ErrorResponse,
    HealthResponse, WebhookAckResponse,
};
pub use handlers::{DonationApiError, DonationAppState};
pub use routes::{donation_router, donation_routes};
