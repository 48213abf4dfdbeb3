//! Order-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | ConcurrentModification | 409 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, OrderId};

use super::OrderStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// No order with this id exists in the store.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// Competing writers kept changing the status between read and write.
    #[error("Order {order_id} kept changing (last seen {last_seen})")]
    ConcurrentModification {
        order_id: OrderId,
        last_seen: OrderStatus,
    },

    /// The order store failed.
    #[error("Order store error: {0}")]
    Infrastructure(String),
}

impl OrderError {
    pub fn not_found(id: OrderId) -> Self {
        OrderError::NotFound(id)
    }

    pub fn concurrent_modification(order_id: OrderId, last_seen: OrderStatus) -> Self {
        OrderError::ConcurrentModification { order_id, last_seen }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        OrderError::Infrastructure(message.into())
    }

    /// Lifts an order store failure for order `id`.
    pub fn from_store(id: OrderId, err: DomainError) -> Self {
        match err.code {
            ErrorCode::OrderNotFound => OrderError::NotFound(id),
            _ => err.into(),
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            OrderError::NotFound(_) => ErrorCode::OrderNotFound,
            OrderError::ConcurrentModification { .. } => ErrorCode::ConcurrentModification,
            OrderError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns true if the same request could succeed later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OrderError::ConcurrentModification { .. } | OrderError::Infrastructure(_)
        )
    }
}

impl From<DomainError> for OrderError {
    fn from(err: DomainError) -> Self {
        OrderError::Infrastructure(err.to_string())
    }
}

impl From<OrderError> for DomainError {
    fn from(err: OrderError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
