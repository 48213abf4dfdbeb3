//! Order store port.
//!
//! The shop owns order persistence. The gateway reads orders, writes two
//! metadata slots and requests status changes through compare-and-set
//! operations so racing webhook deliveries cannot overwrite each other.
//!
//! # Example
//!
//! ```ignore
//! match store.set_status(id, OrderStatus::OnHold, OrderStatus::Processing, "Via Webhook").await? {
//!     StatusUpdate::Applied => { /* we moved it */ }
//!     StatusUpdate::AlreadyInState => { /* someone else got there first */ }
//!     StatusUpdate::Conflict { current } => { /* re-read and decide again */ }
//! }
//! ```

use crate::domain::foundation::{DomainError, OrderId};
use crate::domain::order::{Order, OrderStatus};
use async_trait::async_trait;

/// Result of a guarded status write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdate {
    /// The order was in the expected status and now holds the target.
    Applied,

    /// The order already holds the target status; nothing was written.
    AlreadyInState,

    /// The order was in neither the expected nor the target status.
    Conflict { current: OrderStatus },
}

/// Port for the shop's order system of record.
///
/// Implementations must make `set_status` and `complete_payment` atomic
/// with respect to the `expected` guard.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Find an order by id.
    async fn get(&self, id: OrderId) -> Result<Option<Order>, DomainError>;

    /// Move the order from `expected` to `target`, recording `note`.
    ///
    /// # Errors
    ///
    /// - `OrderNotFound` if the order does not exist
    /// - `DatabaseError` on persistence failure
    async fn set_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        target: OrderStatus,
        note: &str,
    ) -> Result<StatusUpdate, DomainError>;

    /// Mark the order paid and run the shop's fulfillment side effects.
    ///
    /// Idempotent: an order that is already completed reports
    /// `AlreadyInState` and fulfillment does not run again.
    async fn complete_payment(
        &self,
        id: OrderId,
        expected: OrderStatus,
    ) -> Result<StatusUpdate, DomainError>;

    /// Write a metadata slot on the order.
    async fn set_metadata(&self, id: OrderId, key: &str, value: &str) -> Result<(), DomainError>;

    /// Atomically increment and return the order's checkout attempt counter.
    ///
    /// The first call for an order returns 1.
    async fn next_checkout_attempt(&self, id: OrderId) -> Result<u32, DomainError>;
}
