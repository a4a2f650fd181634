//! Shared signing credential.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use super::errors::SigningError;

/// Client id and shared secret issued by the payment processor.
///
/// Loaded once at startup. An empty credential is allowed to exist so the
/// service can boot in degraded mode; every signing attempt then fails with
/// [`SigningError`] and inbound callbacks are never accepted.
#[derive(Clone)]
pub struct SigningCredential {
    client_id: String,
    secret_key: SecretString,
}

impl SigningCredential {
    pub fn new(client_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            secret_key: SecretString::new(secret_key.into()),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn secret_bytes(&self) -> &[u8] {
        self.secret_key.expose_secret().as_bytes()
    }

    /// True when neither the client id nor the secret is blank.
    pub fn is_configured(&self) -> bool {
        self.ensure_configured().is_ok()
    }

    /// Fails with the first missing component.
    pub fn ensure_configured(&self) -> Result<(), SigningError> {
        if self.client_id.trim().is_empty() {
            return Err(SigningError::MissingClientId);
        }
        if self.secret_key.expose_secret().trim().is_empty() {
            return Err(SigningError::MissingSecretKey);
        }
        Ok(())
    }
}

impl fmt::Debug for SigningCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningCredential")
            .field("client_id", &self.client_id)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
