//! Foundation module - Shared domain primitives.
//!
//! Value objects, the state machine trait and the validation error type
//! used by the signing and donation modules.

mod errors;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use state_machine::{StateMachine, Transition};
pub use timestamp::Timestamp;
