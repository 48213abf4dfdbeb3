//! Shared state for the gateway's HTTP routes.

use std::sync::Arc;

use axum::http::StatusCode;

use crate::application::{HandlePaymentWebhookHandler, InitiateCheckoutHandler};
use crate::config::GatewayConfig;
use crate::ports::{HttpClient, OrderStore};

/// Shared application state containing all dependencies.
///
/// Cloned for each request; handlers are built once and shared behind `Arc`.
#[derive(Clone)]
pub struct GatewayAppState {
    pub webhook_handler: Arc<HandlePaymentWebhookHandler>,
    pub checkout_handler: Arc<InitiateCheckoutHandler>,
    /// Status sent with verified notifications.
    pub ack_status: StatusCode,
    /// Status sent with notifications that failed verification.
    pub unverified_status: StatusCode,
    /// Text returned to the customer alongside the checkout redirect.
    pub instructions: Option<String>,
}

impl GatewayAppState {
    /// Wires the application handlers over the given ports.
    pub fn new(
        store: Arc<dyn OrderStore>,
        http_client: Arc<dyn HttpClient>,
        config: &GatewayConfig,
    ) -> Self {
        let webhook_handler = HandlePaymentWebhookHandler::new(store.clone(), config.signing_context());
        let checkout_handler =
            InitiateCheckoutHandler::new(store, http_client, config.checkout_settings());
        let instructions = Some(config.instructions.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        Self {
            webhook_handler: Arc::new(webhook_handler),
            checkout_handler: Arc::new(checkout_handler),
            ack_status: status_or_created(config.ack_status_code),
            unverified_status: status_or_created(config.unverified_status_code),
            instructions,
        }
    }
}

fn status_or_created(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::CREATED)
}
