//! Canonical callback verifier.
//!
//! Recomputes digest and signature for an inbound callback and compares them
//! against the presented headers in constant time. The body must be the raw
//! bytes as received; re-serialized JSON will not match.
//!
//! # Verification Steps
//!
//! 1. Every required header must be present
//! 2. Digest over the raw body must equal the presented `Digest`
//! 3. Signature over the canonical string must equal the presented `Signature`
//! 4. `Request-Timestamp` must fall inside the freshness window (if enabled)

use std::fmt;

use subtle::ConstantTimeEq;

use crate::domain::foundation::Timestamp;

use super::credential::SigningCredential;
use super::headers::SecurityHeaders;
use super::signer::{body_digest, canonical_string, hmac_base64, DIGEST_PREFIX, SIGNATURE_PREFIX};

/// Maximum allowed age for callbacks (5 minutes).
pub const MAX_CALLBACK_AGE_SECS: i64 = 300;

/// Maximum allowed clock skew for callbacks stamped in the future (1 minute).
pub const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Accepted range for `Request-Timestamp` relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessWindow {
    pub max_age_secs: i64,
    pub max_skew_secs: i64,
}

impl FreshnessWindow {
    pub fn new(max_age_secs: i64, max_skew_secs: i64) -> Self {
        Self {
            max_age_secs,
            max_skew_secs,
        }
    }
}

impl Default for FreshnessWindow {
    fn default() -> Self {
        Self::new(MAX_CALLBACK_AGE_SECS, MAX_CLOCK_SKEW_SECS)
    }
}

/// Why a callback failed authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The verifier has no usable credential.
    NotConfigured,
    /// One or more required headers were absent.
    MissingHeaders(Vec<&'static str>),
    /// Body bytes do not hash to the presented digest.
    DigestMismatch,
    /// HMAC over the canonical string does not match.
    SignatureMismatch,
    /// `Request-Timestamp` is not RFC 3339.
    MalformedTimestamp(String),
    /// Timestamp is older than the window allows.
    Stale { age_secs: i64 },
    /// Timestamp is further in the future than the skew allows.
    FromFuture { ahead_secs: i64 },
}

impl Rejection {
    /// Stable snake_case tag for logs and audit records.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::NotConfigured => "not_configured",
            Rejection::MissingHeaders(_) => "missing_headers",
            Rejection::DigestMismatch => "digest_mismatch",
            Rejection::SignatureMismatch => "signature_mismatch",
            Rejection::MalformedTimestamp(_) => "malformed_timestamp",
            Rejection::Stale { .. } => "stale_timestamp",
            Rejection::FromFuture { .. } => "future_timestamp",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotConfigured => write!(f, "verifier has no signing credential"),
            Rejection::MissingHeaders(names) => {
                write!(f, "missing headers: {}", names.join(", "))
            }
            Rejection::DigestMismatch => write!(f, "digest does not match body"),
            Rejection::SignatureMismatch => write!(f, "signature does not match"),
            Rejection::MalformedTimestamp(value) => {
                write!(f, "malformed request timestamp '{}'", value)
            }
            Rejection::Stale { age_secs } => {
                write!(f, "request timestamp is {} seconds old", age_secs)
            }
            Rejection::FromFuture { ahead_secs } => {
                write!(f, "request timestamp is {} seconds in the future", ahead_secs)
            }
        }
    }
}

/// Outcome of verifying one callback.
///
/// `digest_ok` and `signature_ok` are reported independently so logs can tell
/// a tampered body from a bad key. `rejection` names the first failing check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyResult {
    pub digest_ok: bool,
    pub signature_ok: bool,
    pub fresh: bool,
    pub rejection: Option<Rejection>,
}

impl VerifyResult {
    fn rejected(rejection: Rejection) -> Self {
        Self {
            digest_ok: false,
            signature_ok: false,
            fresh: false,
            rejection: Some(rejection),
        }
    }

    /// True only when every check passed.
    pub fn is_authentic(&self) -> bool {
        self.digest_ok && self.signature_ok && self.fresh && self.rejection.is_none()
    }
}

/// Verifies callbacks signed with the shared credential.
#[derive(Debug, Clone)]
pub struct CanonicalVerifier {
    credential: SigningCredential,
    default_target: String,
    freshness: Option<FreshnessWindow>,
}

impl CanonicalVerifier {
    /// `default_target` is used as `Request-Target` when the sender omits it.
    pub fn new(credential: SigningCredential, default_target: impl Into<String>) -> Self {
        Self {
            credential,
            default_target: default_target.into(),
            freshness: Some(FreshnessWindow::default()),
        }
    }

    /// Replace the freshness window; `None` accepts any timestamp.
    pub fn with_freshness(mut self, freshness: Option<FreshnessWindow>) -> Self {
        self.freshness = freshness;
        self
    }

    pub fn verify(&self, headers: &SecurityHeaders, raw_body: &[u8]) -> VerifyResult {
        self.verify_at(headers, raw_body, Timestamp::now())
    }

    /// Verifies against an explicit clock reading.
    pub fn verify_at(
        &self,
        headers: &SecurityHeaders,
        raw_body: &[u8],
        now: Timestamp,
    ) -> VerifyResult {
        if !self.credential.is_configured() {
            return VerifyResult::rejected(Rejection::NotConfigured);
        }

        let presented = match headers.required() {
            Ok(presented) => presented,
            Err(missing) => return VerifyResult::rejected(Rejection::MissingHeaders(missing)),
        };

        let computed_digest = body_digest(raw_body);
        let digest_ok = constant_time_compare(
            strip(&computed_digest, DIGEST_PREFIX).as_bytes(),
            strip(presented.digest, DIGEST_PREFIX).as_bytes(),
        );

        let canonical = canonical_string(
            self.credential.client_id(),
            presented.request_id,
            presented.timestamp,
            presented.request_target.unwrap_or(&self.default_target),
            &computed_digest,
        );
        let signature_ok = match hmac_base64(self.credential.secret_bytes(), &canonical) {
            Ok(expected) => constant_time_compare(
                expected.as_bytes(),
                strip(presented.signature, SIGNATURE_PREFIX).as_bytes(),
            ),
            Err(_) => false,
        };

        let freshness = self.check_freshness(presented.timestamp, now);

        let rejection = if !digest_ok {
            Some(Rejection::DigestMismatch)
        } else if !signature_ok {
            Some(Rejection::SignatureMismatch)
        } else {
            freshness.clone().err()
        };

        VerifyResult {
            digest_ok,
            signature_ok,
            fresh: freshness.is_ok(),
            rejection,
        }
    }

    fn check_freshness(&self, timestamp: &str, now: Timestamp) -> Result<(), Rejection> {
        let Some(window) = self.freshness else {
            return Ok(());
        };

        let stamped = Timestamp::parse_rfc3339(timestamp)
            .ok_or_else(|| Rejection::MalformedTimestamp(timestamp.to_string()))?;
        let age = now.duration_since(&stamped).num_seconds();

        if age > window.max_age_secs {
            return Err(Rejection::Stale { age_secs: age });
        }
        if age < -window.max_skew_secs {
            return Err(Rejection::FromFuture { ahead_secs: -age });
        }
        Ok(())
    }
}

fn strip<'a>(value: &'a str, prefix: &str) -> &'a str {
    value.strip_prefix(prefix).unwrap_or(value)
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
