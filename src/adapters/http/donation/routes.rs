//! Axum router configuration for donation endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_donation, get_donation, health, ingest_doku_webhook, DonationAppState};

/// Donation API routes, mounted under `/api`.
///
/// # Routes
/// - `POST /donations` - Open a checkout session
/// - `GET /donations/:invoice_number` - Get a donation record
pub fn donation_routes() -> Router<DonationAppState> {
    Router::new()
        .route("/donations", post(create_donation))
        .route("/donations/:invoice_number", get(get_donation))
}

/// Complete application router.
///
/// The webhook is mounted at the configured webhook path (default
/// `/api/webhooks/doku`) so the route and the fallback `Request-Target`
/// always agree.
///
/// # Example
///
/// ```ignore
/// let app = donation_router(state).layer(TraceLayer::new_for_http());
/// axum::serve(listener, app).await?;
/// ```
pub fn donation_router(state: DonationAppState) -> Router {
    let webhook_path = state.checkout.webhook_path.clone();
    Router::new()
        .nest("/api", donation_routes())
        .route(&webhook_path, post(ingest_doku_webhook))
        .route("/health", get(health))
        .with_state(state)
}
