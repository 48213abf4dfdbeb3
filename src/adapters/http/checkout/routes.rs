//! Axum router configuration for checkout endpoints.

use axum::{routing::post, Router};

use super::handlers::initiate_checkout;
use crate::adapters::http::GatewayAppState;

/// Create the checkout router.
///
/// # Routes
/// - `POST /orders/:order_id/checkout` - Open a checkout session for an order
pub fn checkout_routes() -> Router<GatewayAppState> {
    Router::new().route("/orders/:order_id/checkout", post(initiate_checkout))
}
