//! Sparco gateway server entry point.

use std::sync::Arc;

use anyhow::Context;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sparco_gateway::adapters::{api_router, GatewayAppState, InMemoryOrderStore, ReqwestHttpClient};
use sparco_gateway::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    init_tracing(&config);

    let addr = config.server.socket_addr()?;
    let store = Arc::new(InMemoryOrderStore::new());
    let http_client = Arc::new(
        ReqwestHttpClient::new(config.gateway.max_redirects)
            .context("failed to build checkout HTTP client")?,
    );
    let state = GatewayAppState::new(store, http_client, &config.gateway);

    let app = api_router(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        processor = %config.gateway.base_url,
        "sparco-gateway v{} listening",
        env!("CARGO_PKG_VERSION")
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.server.json_logs() {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
