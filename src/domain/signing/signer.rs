//! Canonical request signer.
//!
//! Produces the `Digest` and `Signature` headers the processor expects on
//! every call:
//!
//! ```text
//! Digest    = "SHA-256=" + base64(sha256(body))
//! canonical = "Client-Id:<id>\nRequest-Id:<uuid>\nRequest-Timestamp:<rfc3339>\n"
//!             "Request-Target:<path>\nDigest:<digest>"
//! Signature = "HMACSHA256=" + base64(hmac_sha256(secret, canonical))
//! ```
//!
//! Field order in the canonical string is fixed. The digest is always taken
//! over the exact bytes that go on the wire.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::{Digest as _, Sha256};
use uuid::Uuid;

use crate::domain::foundation::Timestamp;

use super::credential::SigningCredential;
use super::errors::SigningError;
use super::headers;

type HmacSha256 = Hmac<Sha256>;

/// Prefix on the `Digest` header value.
pub const DIGEST_PREFIX: &str = "SHA-256=";

/// Prefix on the `Signature` header value.
pub const SIGNATURE_PREFIX: &str = "HMACSHA256=";

/// Per-call inputs that vary between attempts.
///
/// A retry must use a fresh context; the processor treats `request_id` as
/// unique per attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequestContext {
    pub request_id: String,
    pub timestamp: String,
    pub request_target: String,
}

impl SignedRequestContext {
    /// New random request id and the current time, to the second.
    pub fn fresh(request_target: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            timestamp: Timestamp::now().to_rfc3339_secs(),
            request_target: request_target.into(),
        }
    }

    /// Fixed values, for replaying a known signature.
    pub fn fixed(
        request_id: impl Into<String>,
        timestamp: impl Into<String>,
        request_target: impl Into<String>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            timestamp: timestamp.into(),
            request_target: request_target.into(),
        }
    }
}

/// Complete set of security headers for one outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub client_id: String,
    pub request_id: String,
    pub timestamp: String,
    pub request_target: String,
    pub digest: String,
    pub signature: String,
}

impl SignedHeaders {
    /// Header name/value pairs in wire order.
    pub fn pairs(&self) -> [(&'static str, &str); 6] {
        [
            (headers::CLIENT_ID, self.client_id.as_str()),
            (headers::REQUEST_ID, self.request_id.as_str()),
            (headers::REQUEST_TIMESTAMP, self.timestamp.as_str()),
            (headers::REQUEST_TARGET, self.request_target.as_str()),
            (headers::DIGEST, self.digest.as_str()),
            (headers::SIGNATURE, self.signature.as_str()),
        ]
    }
}

/// Signs outbound requests with a shared credential.
#[derive(Debug, Clone)]
pub struct CanonicalSigner {
    credential: SigningCredential,
}

impl CanonicalSigner {
    pub fn new(credential: SigningCredential) -> Self {
        Self { credential }
    }

    pub fn credential(&self) -> &SigningCredential {
        &self.credential
    }

    /// Signs `body` for `request_target` with a freshly minted request id
    /// and timestamp.
    ///
    /// # Errors
    ///
    /// `SigningError::MissingClientId` / `MissingSecretKey` when the
    /// credential is incomplete. Nothing is signed in that case.
    pub fn sign(&self, request_target: &str, body: &[u8]) -> Result<SignedHeaders, SigningError> {
        self.sign_with(&SignedRequestContext::fresh(request_target), body)
    }

    /// Signs `body` using caller-supplied request id and timestamp.
    ///
    /// Deterministic: identical inputs always yield identical headers.
    pub fn sign_with(
        &self,
        context: &SignedRequestContext,
        body: &[u8],
    ) -> Result<SignedHeaders, SigningError> {
        self.credential.ensure_configured()?;

        let digest = body_digest(body);
        let canonical = canonical_string(
            self.credential.client_id(),
            &context.request_id,
            &context.timestamp,
            &context.request_target,
            &digest,
        );
        let signature = format!(
            "{}{}",
            SIGNATURE_PREFIX,
            hmac_base64(self.credential.secret_bytes(), &canonical)?
        );

        Ok(SignedHeaders {
            client_id: self.credential.client_id().to_string(),
            request_id: context.request_id.clone(),
            timestamp: context.timestamp.clone(),
            request_target: context.request_target.clone(),
            digest,
            signature,
        })
    }
}

/// `SHA-256=` + base64 SHA-256 of the exact body bytes.
pub fn body_digest(body: &[u8]) -> String {
    format!("{}{}", DIGEST_PREFIX, STANDARD.encode(Sha256::digest(body)))
}

/// Joins the five signed components with `\n`, in protocol order.
pub fn canonical_string(
    client_id: &str,
    request_id: &str,
    timestamp: &str,
    request_target: &str,
    digest: &str,
) -> String {
    [
        format!("Client-Id:{}", client_id),
        format!("Request-Id:{}", request_id),
        format!("Request-Timestamp:{}", timestamp),
        format!("Request-Target:{}", request_target),
        format!("Digest:{}", digest),
    ]
    .join("\n")
}

/// Base64 HMAC-SHA256, without the header prefix.
pub(crate) fn hmac_base64(secret: &[u8], canonical: &str) -> Result<String, SigningError> {
    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| SigningError::InvalidKey)?;
    mac.update(canonical.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
