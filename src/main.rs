//! Donation Gateway server
//!
//! Loads configuration, installs logging, wires the in-memory ledger and the
//! DOKU client into the HTTP router, and serves until Ctrl-C or SIGTERM.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use donation_gateway::adapters::http::{donation_router, DonationAppState};
use donation_gateway::adapters::{
    DokuCheckoutClient, DokuConfig, InMemoryDonationLedger, InMemoryWebhookAuditLog,
};
use donation_gateway::config::{AppConfig, LogFormat, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let gateway = &config.gateway;
    if !gateway.has_credentials() {
        tracing::warn!(
            "DOKU credentials are not configured; checkout requests will fail and callbacks will be rejected"
        );
    }

    let doku = DokuCheckoutClient::new(
        DokuConfig::new(gateway.base_url.as_str()).with_timeout_secs(gateway.request_timeout_secs),
    )?;

    let state = DonationAppState::new(
        Arc::new(InMemoryDonationLedger::new()),
        Arc::new(doku),
        Arc::new(InMemoryWebhookAuditLog::new()),
        gateway.credential(),
        gateway.checkout_options(),
    )
    .with_public_base_url(gateway.public_base_url.clone())
    .with_webhook_freshness(gateway.freshness_window());

    let app = donation_router(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        processor = %gateway.base_url,
        webhook_path = %gateway.webhook_path,
        "Donation gateway listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Donation gateway stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match server.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
