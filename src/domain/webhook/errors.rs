//! Webhook error types for Sparco payment notifications.
//!
//! None of these escape the webhook handler: each is folded into the
//! acknowledgement body as `errMsg`.

use thiserror::Error;

use crate::domain::foundation::OrderId;
use crate::domain::order::OrderError;

/// Errors that occur while processing a payment notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// Body is neither a JSON object nor form-encoded.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Required field missing from the payload.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// `merchantReference` does not end in an order id.
    #[error("Invalid merchant reference: {0}")]
    InvalidMerchantReference(String),

    /// Referenced order could not be found.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Order kept changing while the transition was being applied.
    #[error("Order {0} was modified concurrently")]
    ConcurrentModification(OrderId),

    /// Order store failed.
    #[error("Order store error: {0}")]
    Store(String),
}

impl WebhookError {
    /// Stable machine-readable name of the error.
    pub fn kind(&self) -> &'static str {
        match self {
            WebhookError::MalformedPayload(_) => "malformed_payload",
            WebhookError::MissingField(_) => "missing_field",
            WebhookError::InvalidMerchantReference(_) => "invalid_merchant_reference",
            WebhookError::OrderNotFound(_) => "order_not_found",
            WebhookError::ConcurrentModification(_) => "concurrent_modification",
            WebhookError::Store(_) => "store",
        }
    }

    /// Returns true if redelivering the same notification could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WebhookError::ConcurrentModification(_)
                | WebhookError::Store(_)
                | WebhookError::OrderNotFound(_) // Might be eventual consistency
        )
    }
}

impl From<OrderError> for WebhookError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(id) => WebhookError::OrderNotFound(id),
            OrderError::ConcurrentModification { order_id, .. } => {
                WebhookError::ConcurrentModification(order_id)
            }
            OrderError::Infrastructure(msg) => WebhookError::Store(msg),
        }
    }
}
