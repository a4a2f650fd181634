//! Donation Gateway - Signed checkout initiation and webhook verification
//!
//! This crate opens hosted-checkout sessions with the DOKU payment processor
//! using HMAC-SHA256 request signatures, authenticates the processor's
//! asynchronous payment notifications, and keeps a ledger of donation status.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
