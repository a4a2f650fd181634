//! End-to-end donation flow through the HTTP router.
//!
//! Checkout is opened against a mock processor, then callbacks signed with
//! the shared credential drive the ledger record through its lifecycle.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use donation_gateway::adapters::http::{donation_router, DonationAppState};
use donation_gateway::adapters::{
    InMemoryDonationLedger, InMemoryWebhookAuditLog, MockCheckoutGateway,
};
use donation_gateway::application::handlers::donation::CheckoutOptions;
use donation_gateway::domain::signing::{CanonicalSigner, SigningCredential};
use donation_gateway::ports::AuditOutcome;

// =============================================================================
// Test Infrastructure
// =============================================================================

const CLIENT_ID: &str = "BRN-0001";
const SECRET: &str = "SK-flow";

struct TestApp {
    router: Router,
    audit_log: Arc<InMemoryWebhookAuditLog>,
    gateway: MockCheckoutGateway,
}

impl TestApp {
    fn new() -> Self {
        let audit_log = Arc::new(InMemoryWebhookAuditLog::new());
        let gateway = MockCheckoutGateway::new();
        gateway.set_response(json!({
            "response": {"payment": {"url": "https://sandbox.doku.test/pay/flow"}}
        }));

        let state = DonationAppState::new(
            Arc::new(InMemoryDonationLedger::new()),
            Arc::new(gateway.clone()),
            audit_log.clone(),
            SigningCredential::new(CLIENT_ID, SECRET),
            CheckoutOptions::default(),
        )
        .with_public_base_url(Some("https://give.example/".to_string()));

        Self {
            router: donation_router(state),
            audit_log,
            gateway,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn open_checkout(&self) -> String {
        let request = Request::builder()
            .method("POST")
            .uri("/api/donations")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "amount": 150000,
                    "donorName": "Budi",
                    "donorEmail": "budi@example.com",
                    "frequency": "monthly"
                })
                .to_string(),
            ))
            .unwrap();

        let (status, body) = self.send(request).await;
        assert_eq!(status, StatusCode::OK, "checkout failed: {}", body);
        assert_eq!(body["checkoutUrl"], "https://sandbox.doku.test/pay/flow");
        body["invoiceNumber"].as_str().unwrap().to_string()
    }

    async fn deliver(&self, invoice_number: &str, status: &str, secret: &str) -> Value {
        let payload = json!({
            "order": {"invoice_number": invoice_number, "amount": 150000},
            "transaction": {"status": status}
        });
        let (code, body) = self.send(signed_callback(&payload, secret)).await;
        assert_eq!(code, StatusCode::OK);
        body
    }

    async fn donation(&self, invoice_number: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(format!("/api/donations/{}", invoice_number))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }
}

fn signed_callback(payload: &Value, secret: &str) -> Request<Body> {
    let body = serde_json::to_vec(payload).unwrap();
    let headers = CanonicalSigner::new(SigningCredential::new(CLIENT_ID, secret))
        .sign("/api/webhooks/doku", &body)
        .unwrap();

    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/webhooks/doku")
        .header("content-type", "application/json");
    for (name, value) in headers.pairs() {
        builder = builder.header(name, value);
    }
    builder.body(Body::from(body)).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn checkout_then_success_callback_settles_donation() {
    let app = TestApp::new();
    let invoice = app.open_checkout().await;

    let (status, record) = app.donation(&invoice).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["status"], "CREATED");
    assert_eq!(record["amount"], 150000);
    assert_eq!(record["frequency"], "monthly");

    let sent: Value = serde_json::from_slice(&app.gateway.last_call().unwrap().body).unwrap();
    assert_eq!(sent["order"]["invoice_number"], invoice.as_str());
    assert_eq!(
        sent["order"]["success_url"],
        format!("https://give.example/payment/success?invoice={}", invoice)
    );
    assert_eq!(
        sent["order"]["callback_url"],
        "https://give.example/api/webhooks/doku"
    );

    let ack = app.deliver(&invoice, "PENDING", SECRET).await;
    assert_eq!(ack, json!({"received": true, "valid": true}));
    assert_eq!(app.donation(&invoice).await.1["status"], "PENDING");

    app.deliver(&invoice, "success", SECRET).await;
    assert_eq!(app.donation(&invoice).await.1["status"], "SUCCESS");

    let outcomes: Vec<AuditOutcome> = app
        .audit_log
        .for_invoice(&invoice)
        .await
        .into_iter()
        .map(|entry| entry.outcome)
        .collect();
    assert_eq!(outcomes, vec![AuditOutcome::Applied, AuditOutcome::Applied]);
}

#[tokio::test]
async fn forged_callback_changes_nothing() {
    let app = TestApp::new();
    let invoice = app.open_checkout().await;

    let ack = app.deliver(&invoice, "SUCCESS", "SK-forged").await;

    assert_eq!(ack, json!({"received": true, "valid": false}));
    assert_eq!(app.donation(&invoice).await.1["status"], "CREATED");

    let entries = app.audit_log.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].outcome, AuditOutcome::Rejected);
    assert!(!entries[0].authenticated);
}

#[tokio::test]
async fn redelivered_callback_is_idempotent() {
    let app = TestApp::new();
    let invoice = app.open_checkout().await;

    app.deliver(&invoice, "SUCCESS", SECRET).await;
    let ack = app.deliver(&invoice, "SUCCESS", SECRET).await;

    assert_eq!(ack["valid"], true);
    assert_eq!(app.donation(&invoice).await.1["status"], "SUCCESS");

    let outcomes: Vec<AuditOutcome> = app
        .audit_log
        .for_invoice(&invoice)
        .await
        .into_iter()
        .map(|entry| entry.outcome)
        .collect();
    assert_eq!(outcomes, vec![AuditOutcome::Applied, AuditOutcome::Duplicate]);
}

#[tokio::test]
async fn settled_donation_does_not_regress() {
    let app = TestApp::new();
    let invoice = app.open_checkout().await;

    app.deliver(&invoice, "SUCCESS", SECRET).await;
    let ack = app.deliver(&invoice, "EXPIRED", SECRET).await;

    assert_eq!(ack["valid"], true);
    assert_eq!(app.donation(&invoice).await.1["status"], "SUCCESS");

    let entries = app.audit_log.for_invoice(&invoice).await;
    assert_eq!(entries.last().unwrap().outcome, AuditOutcome::Refused);
}

#[tokio::test]
async fn callback_for_unknown_invoice_is_acknowledged() {
    let app = TestApp::new();

    let ack = app.deliver("DON-0-UNKNOWN", "SUCCESS", SECRET).await;

    assert_eq!(ack, json!({"received": true, "valid": true}));
    let (status, _) = app.donation("DON-0-UNKNOWN").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        app.audit_log.entries().await[0].outcome,
        AuditOutcome::Orphan
    );
}
