//! Axum router configuration for webhook endpoints.

use axum::{routing::post, Router};

use super::handlers::handle_sparco_webhook;
use crate::adapters::http::GatewayAppState;

/// Create the webhook router.
///
/// No authentication: notifications are verified by their signature.
///
/// # Routes
/// - `POST /sparco` - Handle Sparco payment notifications
pub fn webhook_routes() -> Router<GatewayAppState> {
    Router::new().route("/sparco", post(handle_sparco_webhook))
}
