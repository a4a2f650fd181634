//! HTTP adapters - REST API implementations.

pub mod donation;

// Re-export key types for convenience
pub use donation::donation_router;
pub use donation::DonationAppState;
