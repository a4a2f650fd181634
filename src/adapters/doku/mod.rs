//! DOKU payment processor adapters.

mod client;
mod mock_gateway;

pub use client::{DokuCheckoutClient, DokuConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use mock_gateway::MockCheckoutGateway;
