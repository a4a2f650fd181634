//! Security header names and the inbound header set.

use super::signer::SignedHeaders;

pub const CLIENT_ID: &str = "Client-Id";
pub const REQUEST_ID: &str = "Request-Id";
pub const REQUEST_TIMESTAMP: &str = "Request-Timestamp";
pub const REQUEST_TARGET: &str = "Request-Target";
pub const DIGEST: &str = "Digest";
pub const SIGNATURE: &str = "Signature";

/// Security headers as presented on an inbound callback.
///
/// Every field is optional because the sender controls them; absence is
/// reported by [`SecurityHeaders::required`] rather than at extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityHeaders {
    pub client_id: Option<String>,
    pub request_id: Option<String>,
    pub timestamp: Option<String>,
    pub request_target: Option<String>,
    pub digest: Option<String>,
    pub signature: Option<String>,
}

/// Borrowed view of the headers once every required one is present.
#[derive(Debug, Clone, Copy)]
pub struct PresentedHeaders<'a> {
    pub client_id: &'a str,
    pub request_id: &'a str,
    pub timestamp: &'a str,
    pub request_target: Option<&'a str>,
    pub digest: &'a str,
    pub signature: &'a str,
}

impl SecurityHeaders {
    /// Builds the header set from any name -> value lookup.
    ///
    /// Values are trimmed; empty values count as absent.
    pub fn from_lookup<'a, F>(lookup: F) -> Self
    where
        F: Fn(&'static str) -> Option<&'a str>,
    {
        let read = |name: &'static str| {
            lookup(name)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        Self {
            client_id: read(CLIENT_ID),
            request_id: read(REQUEST_ID),
            timestamp: read(REQUEST_TIMESTAMP),
            request_target: read(REQUEST_TARGET),
            digest: read(DIGEST),
            signature: read(SIGNATURE),
        }
    }

    /// Returns the required headers, or the names of those missing.
    ///
    /// `Request-Target` is not required; callers fall back to the path the
    /// callback was delivered to.
    pub fn required(&self) -> Result<PresentedHeaders<'_>, Vec<&'static str>> {
        let mut missing = Vec::new();

        let presented = PresentedHeaders {
            client_id: take(&self.client_id, CLIENT_ID, &mut missing),
            request_id: take(&self.request_id, REQUEST_ID, &mut missing),
            timestamp: take(&self.timestamp, REQUEST_TIMESTAMP, &mut missing),
            request_target: self.request_target.as_deref(),
            digest: take(&self.digest, DIGEST, &mut missing),
            signature: take(&self.signature, SIGNATURE, &mut missing),
        };

        if missing.is_empty() {
            Ok(presented)
        } else {
            Err(missing)
        }
    }
}

fn take<'a>(
    value: &'a Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> &'a str {
    match value.as_deref() {
        Some(v) => v,
        None => {
            missing.push(name);
            ""
        }
    }
}

impl From<&SignedHeaders> for SecurityHeaders {
    fn from(signed: &SignedHeaders) -> Self {
        Self {
            client_id: Some(signed.client_id.clone()),
            request_id: Some(signed.request_id.clone()),
            timestamp: Some(signed.timestamp.clone()),
            request_target: Some(signed.request_target.clone()),
            digest: Some(signed.digest.clone()),
            signature: Some(signed.signature.clone()),
        }
    }
}
