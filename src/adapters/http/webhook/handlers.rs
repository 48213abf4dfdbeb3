//! HTTP handler for Sparco payment notifications.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{header, HeaderMap, StatusCode};

use crate::adapters::http::GatewayAppState;
use crate::application::HandlePaymentWebhookCommand;
use crate::domain::webhook::{WebhookOutcome, WebhookResponse};

/// POST /api/webhooks/sparco - Handle a Sparco payment notification.
///
/// Always answers with an acknowledgement body; the status code depends
/// only on whether the signature verified.
pub async fn handle_sparco_webhook(
    State(state): State<GatewayAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<WebhookResponse>) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let cmd = HandlePaymentWebhookCommand {
        body: body.to_vec(),
        content_type,
    };
    let outcome = state.webhook_handler.handle(cmd).await;

    if let WebhookOutcome::Failed(err) = &outcome {
        tracing::warn!(
            kind = err.kind(),
            retryable = err.is_retryable(),
            "Webhook acknowledged with error"
        );
    }

    let status = if outcome.is_verified() {
        state.ack_status
    } else {
        state.unverified_status
    };

    (status, Json(outcome.to_response()))
}
