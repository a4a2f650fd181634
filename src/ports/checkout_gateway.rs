//! CheckoutGateway port - Submits signed payment requests to the processor.
//!
//! The request arrives already signed; implementations must send `body`
//! byte-for-byte, since the `Digest` header covers exactly those bytes.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::signing::SignedHeaders;

/// A request ready to go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPaymentRequest {
    /// Security headers; `request_target` is the path to POST to.
    pub headers: SignedHeaders,
    /// Serialized JSON body.
    pub body: Vec<u8>,
}

/// A 2xx answer from the processor.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

/// Failures talking to the processor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Connection refused, DNS failure, TLS error and the like.
    #[error("network error: {0}")]
    Network(String),

    /// No answer within the configured timeout.
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Processor answered with a non-2xx status.
    #[error("processor returned {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Processor answered 2xx with a body that is not JSON.
    #[error("processor returned an unreadable body: {raw}")]
    InvalidResponse { status: u16, raw: String },
}

impl GatewayError {
    /// HTTP status from the processor, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Rejected { status, .. } | GatewayError::InvalidResponse { status, .. } => {
                Some(*status)
            }
            GatewayError::Network(_) | GatewayError::Timeout(_) => None,
        }
    }
}

/// Port for the remote payment processor.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// POST a signed create-payment request.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on transport failure, timeout, non-2xx status,
    /// or a 2xx body that is not JSON.
    async fn submit_payment(
        &self,
        request: SignedPaymentRequest,
    ) -> Result<GatewayResponse, GatewayError>;
}
