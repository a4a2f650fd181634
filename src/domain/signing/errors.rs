//! Signing error types.

use thiserror::Error;

/// Errors raised while producing a request signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningError {
    #[error("Signing credential has no client id")]
    MissingClientId,

    #[error("Signing credential has no secret key")]
    MissingSecretKey,

    #[error("Secret key rejected by HMAC")]
    InvalidKey,
}
