//! Request signing protocol.
//!
//! Outbound calls are signed with [`CanonicalSigner`]; inbound callbacks are
//! checked with [`CanonicalVerifier`]. Both share one canonical string layout
//! and one credential.

mod credential;
mod errors;
pub mod headers;
mod signer;
mod verifier;

pub use credential::SigningCredential;
pub use errors::SigningError;
pub use headers::{PresentedHeaders, SecurityHeaders};
pub use signer::{
    body_digest, canonical_string, CanonicalSigner, SignedHeaders, SignedRequestContext,
    DIGEST_PREFIX, SIGNATURE_PREFIX,
};
pub use verifier::{
    CanonicalVerifier, FreshnessWindow, Rejection, VerifyResult, MAX_CALLBACK_AGE_SECS,
    MAX_CLOCK_SKEW_SECS,
};
