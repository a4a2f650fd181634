//! Mock checkout gateway for testing.
//!
//! Supports pre-configured responses, error injection and call tracking.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::ports::{CheckoutGateway, GatewayError, GatewayResponse, SignedPaymentRequest};

/// Mock checkout gateway.
///
/// # Example
///
/// ```ignore
/// let gateway = MockCheckoutGateway::with_checkout_url("https://pay.example/x");
/// gateway.set_error(GatewayError::Timeout(20));
/// ```
#[derive(Default)]
pub struct MockCheckoutGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Body returned while no error is queued.
    response: Option<Value>,

    /// Error returned on the next call only.
    next_error: Option<GatewayError>,

    calls: Vec<SignedPaymentRequest>,
}

impl MockCheckoutGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway that answers every call with `{"checkout_url": url}`.
    pub fn with_checkout_url(url: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.set_response(json!({ "checkout_url": url.into() }));
        mock
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    pub fn set_response(&self, body: Value) {
        self.inner.lock().unwrap().response = Some(body);
    }

    pub fn set_error(&self, error: GatewayError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Every request received, in order.
    pub fn calls(&self) -> Vec<SignedPaymentRequest> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().calls.len()
    }

    pub fn last_call(&self) -> Option<SignedPaymentRequest> {
        self.inner.lock().unwrap().calls.last().cloned()
    }
}

impl Clone for MockCheckoutGateway {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl CheckoutGateway for MockCheckoutGateway {
    async fn submit_payment(
        &self,
        request: SignedPaymentRequest,
    ) -> Result<GatewayResponse, GatewayError> {
        let mut state = self.inner.lock().unwrap();
        state.calls.push(request);

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(GatewayResponse {
            status: 200,
            body: state.response.clone().unwrap_or_else(|| json!({})),
        })
    }
}
