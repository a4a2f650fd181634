//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (timestamps, validation errors, state machine)
//! - `signing` - Canonical request signing and callback verification
//! - `donation` - Donation records, invoice numbers and status lifecycle

pub mod donation;
pub mod foundation;
pub mod signing;
