//! HTTP handlers for donation endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::header::HOST;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::handlers::donation::{
    CheckoutOptions, GetDonationHandler, GetDonationQuery, IngestWebhookCommand,
    IngestWebhookHandler, InitiateCheckoutCommand, InitiateCheckoutHandler,
};
use crate::domain::donation::{DonationError, DonorInfo, InvoiceNumberGenerator};
use crate::domain::signing::{
    CanonicalSigner, CanonicalVerifier, FreshnessWindow, SecurityHeaders, SigningCredential,
};
use crate::ports::{CheckoutGateway, DonationLedger, WebhookAuditLog};

use super::dto::{
    CreateDonationRequest, CreateDonationResponse, DonationResponse, ErrorResponse,
    HealthResponse, WebhookAckResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct DonationAppState {
    pub ledger: Arc<dyn DonationLedger>,
    pub gateway: Arc<dyn CheckoutGateway>,
    pub audit_log: Arc<dyn WebhookAuditLog>,
    pub signer: CanonicalSigner,
    pub verifier: CanonicalVerifier,
    pub invoices: Arc<InvoiceNumberGenerator>,
    pub checkout: Arc<CheckoutOptions>,
    /// Origin used for redirect URLs; falls back to the request `Host`.
    pub public_base_url: Option<String>,
}

impl DonationAppState {
    pub fn new(
        ledger: Arc<dyn DonationLedger>,
        gateway: Arc<dyn CheckoutGateway>,
        audit_log: Arc<dyn WebhookAuditLog>,
        credential: SigningCredential,
        checkout: CheckoutOptions,
    ) -> Self {
        let verifier = CanonicalVerifier::new(credential.clone(), checkout.webhook_path.clone());
        Self {
            ledger,
            gateway,
            audit_log,
            signer: CanonicalSigner::new(credential),
            verifier,
            invoices: Arc::new(InvoiceNumberGenerator::new()),
            checkout: Arc::new(checkout),
            public_base_url: None,
        }
    }

    pub fn with_public_base_url(mut self, public_base_url: Option<String>) -> Self {
        self.public_base_url = public_base_url.map(|url| url.trim_end_matches('/').to_string());
        self
    }

    /// `None` disables the callback timestamp window.
    pub fn with_webhook_freshness(mut self, freshness: Option<FreshnessWindow>) -> Self {
        self.verifier = self.verifier.with_freshness(freshness);
        self
    }

    /// Create handlers on demand from the shared state.
    pub fn initiate_checkout_handler(&self) -> InitiateCheckoutHandler {
        InitiateCheckoutHandler::new(
            self.ledger.clone(),
            self.gateway.clone(),
            self.signer.clone(),
            self.invoices.clone(),
            (*self.checkout).clone(),
        )
    }

    pub fn ingest_webhook_handler(&self) -> IngestWebhookHandler {
        IngestWebhookHandler::new(
            self.verifier.clone(),
            self.ledger.clone(),
            self.audit_log.clone(),
        )
    }

    pub fn get_donation_handler(&self) -> GetDonationHandler {
        GetDonationHandler::new(self.ledger.clone())
    }

    /// Public origin for this request.
    fn origin(&self, headers: &HeaderMap) -> String {
        if let Some(base) = &self.public_base_url {
            return base.clone();
        }
        let host = headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("localhost");
        format!("http://{}", host)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/donations/:invoice_number - Get a donation record
pub async fn get_donation(
    State(state): State<DonationAppState>,
    Path(invoice_number): Path<String>,
) -> Result<impl IntoResponse, DonationApiError> {
    let handler = state.get_donation_handler();
    let record = handler.handle(GetDonationQuery { invoice_number }).await?;

    Ok(Json(DonationResponse::from(record)))
}

/// GET /health - Liveness check
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { ok: true })
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/donations - Open a checkout session
pub async fn create_donation(
    State(state): State<DonationAppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateDonationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, DonationApiError> {
    let Json(request) =
        payload.map_err(|rejection| DonationError::Validation(rejection.body_text()))?;
    let amount = request.raw_amount()?;

    let handler = state.initiate_checkout_handler();
    let cmd = InitiateCheckoutCommand {
        amount,
        donor: DonorInfo::new(request.donor_name, request.donor_email, request.donor_phone),
        frequency: request.frequency,
        origin: state.origin(&headers),
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(CreateDonationResponse::from(result)))
}

/// POST /api/webhooks/doku - Processor status callback
///
/// Always answers 200. The body is taken as raw bytes so the digest is
/// checked against exactly what was sent.
pub async fn ingest_doku_webhook(
    State(state): State<DonationAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let security_headers =
        SecurityHeaders::from_lookup(|name| headers.get(name).and_then(|v| v.to_str().ok()));

    let handler = state.ingest_webhook_handler();
    let cmd = IngestWebhookCommand {
        headers: security_headers,
        raw_body: body.to_vec(),
    };

    let valid = match handler.handle(cmd).await {
        Ok(_) => true,
        Err(DonationError::AuthenticationFailure(_)) => false,
        Err(e) => {
            tracing::error!(error = %e, "Webhook processing failed after verification");
            true
        }
    };

    (StatusCode::OK, Json(WebhookAckResponse::new(valid)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct DonationApiError(DonationError);

impl From<DonationError> for DonationApiError {
    fn from(err: DonationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for DonationApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            DonationError::InvalidAmount(_) | DonationError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            DonationError::NotFound(_) => StatusCode::NOT_FOUND,
            DonationError::AuthenticationFailure(_) => StatusCode::UNAUTHORIZED,
            DonationError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
            DonationError::UpstreamUnavailable { .. }
            | DonationError::UpstreamContractViolation { .. } => StatusCode::BAD_GATEWAY,
            DonationError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let code = self.0.code();
        let message = self.0.to_string();
        let body = match self.0 {
            DonationError::UpstreamContractViolation { raw } => {
                ErrorResponse::with_details(code, message, serde_json::json!({ "upstream": raw }))
            }
            DonationError::UpstreamUnavailable {
                status: Some(upstream_status),
                ..
            } => ErrorResponse::with_details(
                code,
                message,
                serde_json::json!({ "upstreamStatus": upstream_status }),
            ),
            _ => ErrorResponse::new(code, message),
        };

        (status, Json(body)).into_response()
    }
}
