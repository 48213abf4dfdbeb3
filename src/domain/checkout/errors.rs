//! Checkout initiation errors.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | OrderNotFound | 404 |
//! | NotPayable | 409 |
//! | RemoteBusiness | 402 |
//! | Transport / RemoteProtocol | 502 |
//! | Order | 500 |

use thiserror::Error;

use crate::domain::foundation::OrderId;
use crate::domain::order::{OrderError, OrderStatus};
use crate::ports::TransportError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The checkout request never got an HTTP response. Order untouched.
    #[error("Checkout request failed: {0}")]
    Transport(#[from] TransportError),

    /// The processor answered 200 but flagged the request as failed.
    #[error("Processor rejected the checkout session")]
    RemoteBusiness { payment_url: Option<String> },

    /// The processor answered with something other than a usable 200.
    #[error("Processor returned unexpected response (HTTP {status})")]
    RemoteProtocol { status: u16 },

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The order's status does not allow opening a checkout session.
    #[error("Order {order_id} cannot be paid in status {status}")]
    NotPayable { order_id: OrderId, status: OrderStatus },

    #[error(transparent)]
    Order(OrderError),
}

impl CheckoutError {
    /// Redirect target the processor supplied despite the failure, if any.
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            CheckoutError::RemoteBusiness { payment_url } => payment_url.as_deref(),
            _ => None,
        }
    }

    /// Returns true if the order was moved to `failed` as part of this error.
    pub fn order_failed(&self) -> bool {
        matches!(
            self,
            CheckoutError::RemoteBusiness { .. } | CheckoutError::RemoteProtocol { .. }
        )
    }
}

impl From<OrderError> for CheckoutError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(id) => CheckoutError::OrderNotFound(id),
            other => CheckoutError::Order(other),
        }
    }
}
