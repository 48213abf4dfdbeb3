//! HTTP handlers for checkout endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::adapters::http::GatewayAppState;
use crate::application::InitiateCheckoutCommand;
use crate::domain::checkout::CheckoutError;
use crate::domain::foundation::OrderId;
use crate::domain::order::OrderError;

use super::dto::{ErrorResponse, InitiateCheckoutRequest, PaymentResultResponse};

/// POST /api/orders/:order_id/checkout - Open a checkout session.
///
/// Redirects to the processor's payment page, or back to `returnUrl` when
/// there is nothing to pay or the processor supplied no page.
pub async fn initiate_checkout(
    State(state): State<GatewayAppState>,
    Path(order_id): Path<u64>,
    Json(request): Json<InitiateCheckoutRequest>,
) -> Result<Json<PaymentResultResponse>, CheckoutApiError> {
    let cmd = InitiateCheckoutCommand {
        order_id: OrderId::new(order_id),
        return_url: request.return_url.clone(),
    };

    let outcome = state.checkout_handler.handle(cmd).await?;
    let redirect = outcome.redirect_url().unwrap_or(&request.return_url);

    Ok(Json(PaymentResultResponse::success(
        redirect,
        state.instructions.clone(),
    )))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts checkout errors to HTTP responses.
#[derive(Debug)]
pub struct CheckoutApiError(CheckoutError);

impl From<CheckoutError> for CheckoutApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self.0 {
            CheckoutError::OrderNotFound(_) => (StatusCode::NOT_FOUND, "ORDER_NOT_FOUND"),
            CheckoutError::NotPayable { .. } => (StatusCode::CONFLICT, "ORDER_NOT_PAYABLE"),
            CheckoutError::RemoteBusiness { .. } => {
                (StatusCode::PAYMENT_REQUIRED, "PAYMENT_REJECTED")
            }
            CheckoutError::Transport(_) => (StatusCode::BAD_GATEWAY, "PROCESSOR_UNAVAILABLE"),
            CheckoutError::RemoteProtocol { .. } => (StatusCode::BAD_GATEWAY, "PROCESSOR_ERROR"),
            CheckoutError::Order(OrderError::ConcurrentModification { .. }) => {
                (StatusCode::CONFLICT, "CONCURRENT_MODIFICATION")
            }
            CheckoutError::Order(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        tracing::warn!(
            error_code,
            order_failed = self.0.order_failed(),
            error = %self.0,
            "Checkout request failed"
        );

        let mut body = ErrorResponse::new(error_code, self.0.to_string());
        if let Some(url) = self.0.redirect_url() {
            body = body.with_details(json!({ "redirect": url }));
        }
        (status, Json(body)).into_response()
    }
}
