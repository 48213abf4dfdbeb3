//! HTTP adapters - REST API implementations.
//!
//! Each flow has its own HTTP adapter; [`api_router`] mounts them all.

pub mod checkout;
pub mod webhook;

mod state;

pub use checkout::checkout_routes;
pub use state::GatewayAppState;
pub use webhook::webhook_routes;

use axum::{routing::get, Router};

/// Create the complete gateway router.
///
/// # Routes
/// - `GET /health` - Liveness probe
/// - `POST /api/webhooks/sparco` - Sparco payment notifications
/// - `POST /api/orders/:order_id/checkout` - Open a checkout session
pub fn api_router(state: GatewayAppState) -> Router {
    let api = Router::new()
        .nest("/webhooks", webhook_routes())
        .merge(checkout_routes());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
