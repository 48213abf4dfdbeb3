//! In-memory order store.
//!
//! Backs the standalone binary and the tests. Every guarded write runs under
//! one write lock, so the compare-and-set contract of `OrderStore` holds for
//! any number of concurrent webhook deliveries.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, OrderId};
use crate::domain::order::{Order, OrderStatus};
use crate::ports::{OrderStore, StatusUpdate};

/// Note recorded when payment completion is applied.
const PAYMENT_COMPLETE_NOTE: &str = "Payment completed.";

#[derive(Debug, Clone)]
struct StoredOrder {
    order: Order,
    notes: Vec<String>,
    checkout_attempts: u32,
    fulfillments: u32,
}

/// Order store holding orders in a process-local map.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderId, StoredOrder>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `orders`.
    pub fn with_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        let map = orders
            .into_iter()
            .map(|order| (order.id, StoredOrder::new(order)))
            .collect();
        Self {
            orders: RwLock::new(map),
        }
    }

    /// Adds or replaces an order.
    pub async fn insert(&self, order: Order) {
        self.orders
            .write()
            .await
            .insert(order.id, StoredOrder::new(order));
    }

    /// Notes recorded against an order, oldest first.
    pub async fn notes(&self, id: OrderId) -> Vec<String> {
        self.orders
            .read()
            .await
            .get(&id)
            .map(|stored| stored.notes.clone())
            .unwrap_or_default()
    }

    /// How many times fulfillment ran for an order.
    pub async fn fulfillment_count(&self, id: OrderId) -> u32 {
        self.orders
            .read()
            .await
            .get(&id)
            .map(|stored| stored.fulfillments)
            .unwrap_or(0)
    }
}

impl StoredOrder {
    fn new(order: Order) -> Self {
        Self {
            order,
            notes: Vec::new(),
            checkout_attempts: 0,
            fulfillments: 0,
        }
    }
}

fn not_found(id: OrderId) -> DomainError {
    DomainError::new(ErrorCode::OrderNotFound, format!("Order {} not found", id))
        .with_detail("order_id", id.to_string())
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn get(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self
            .orders
            .read()
            .await
            .get(&id)
            .map(|stored| stored.order.clone()))
    }

    async fn set_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        target: OrderStatus,
        note: &str,
    ) -> Result<StatusUpdate, DomainError> {
        let mut orders = self.orders.write().await;
        let stored = orders.get_mut(&id).ok_or_else(|| not_found(id))?;

        let current = stored.order.status;
        if current == target {
            return Ok(StatusUpdate::AlreadyInState);
        }
        if current != expected {
            return Ok(StatusUpdate::Conflict { current });
        }

        stored.order.status = target;
        stored.notes.push(note.to_string());
        Ok(StatusUpdate::Applied)
    }

    async fn complete_payment(
        &self,
        id: OrderId,
        expected: OrderStatus,
    ) -> Result<StatusUpdate, DomainError> {
        let mut orders = self.orders.write().await;
        let stored = orders.get_mut(&id).ok_or_else(|| not_found(id))?;

        let current = stored.order.status;
        if current == OrderStatus::Completed {
            return Ok(StatusUpdate::AlreadyInState);
        }
        if current != expected {
            return Ok(StatusUpdate::Conflict { current });
        }

        stored.order.status = OrderStatus::Completed;
        stored.notes.push(PAYMENT_COMPLETE_NOTE.to_string());
        stored.fulfillments += 1;
        Ok(StatusUpdate::Applied)
    }

    async fn set_metadata(&self, id: OrderId, key: &str, value: &str) -> Result<(), DomainError> {
        let mut orders = self.orders.write().await;
        let stored = orders.get_mut(&id).ok_or_else(|| not_found(id))?;
        stored
            .order
            .metadata
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn next_checkout_attempt(&self, id: OrderId) -> Result<u32, DomainError> {
        let mut orders = self.orders.write().await;
        let stored = orders.get_mut(&id).ok_or_else(|| not_found(id))?;
        stored.checkout_attempts += 1;
        Ok(stored.checkout_attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::BillingDetails;
    use std::sync::Arc;

    fn order(id: u64, status: OrderStatus) -> Order {
        let mut order = Order::new(OrderId::new(id), "25.00", "ZMW", BillingDetails::default());
        order.status = status;
        order
    }

    // ══════════════════════════════════════════════════════════════
    // Guarded Status Writes
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn set_status_applies_when_expected_matches() {
        let store = InMemoryOrderStore::with_orders([order(1, OrderStatus::OnHold)]);

        let update = store
            .set_status(OrderId::new(1), OrderStatus::OnHold, OrderStatus::Processing, "moving")
            .await
            .unwrap();

        assert_eq!(update, StatusUpdate::Applied);
        let stored = store.get(OrderId::new(1)).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Processing);
        assert_eq!(store.notes(OrderId::new(1)).await, vec!["moving"]);
    }

    #[tokio::test]
    async fn set_status_reports_conflict_on_stale_expectation() {
        let store = InMemoryOrderStore::with_orders([order(1, OrderStatus::Processing)]);

        let update = store
            .set_status(OrderId::new(1), OrderStatus::OnHold, OrderStatus::Failed, "late")
            .await
            .unwrap();

        assert_eq!(update, StatusUpdate::Conflict { current: OrderStatus::Processing });
        assert!(store.notes(OrderId::new(1)).await.is_empty());
    }

    #[tokio::test]
    async fn set_status_to_current_is_already_in_state() {
        let store = InMemoryOrderStore::with_orders([order(1, OrderStatus::Failed)]);

        let update = store
            .set_status(OrderId::new(1), OrderStatus::OnHold, OrderStatus::Failed, "again")
            .await
            .unwrap();

        assert_eq!(update, StatusUpdate::AlreadyInState);
    }

    #[tokio::test]
    async fn unknown_order_is_an_order_not_found_error() {
        let store = InMemoryOrderStore::new();

        let err = store
            .set_status(OrderId::new(9), OrderStatus::New, OrderStatus::Failed, "x")
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::OrderNotFound);
        assert!(store.get(OrderId::new(9)).await.unwrap().is_none());
    }

    // ══════════════════════════════════════════════════════════════
    // Payment Completion
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn complete_payment_fulfills_once() {
        let store = InMemoryOrderStore::with_orders([order(1, OrderStatus::OnHold)]);

        let first = store.complete_payment(OrderId::new(1), OrderStatus::OnHold).await.unwrap();
        let second = store.complete_payment(OrderId::new(1), OrderStatus::OnHold).await.unwrap();

        assert_eq!(first, StatusUpdate::Applied);
        assert_eq!(second, StatusUpdate::AlreadyInState);
        assert_eq!(store.fulfillment_count(OrderId::new(1)).await, 1);
    }

    #[tokio::test]
    async fn concurrent_completions_fulfill_exactly_once() {
        let store = Arc::new(InMemoryOrderStore::with_orders([order(1, OrderStatus::OnHold)]));

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.complete_payment(OrderId::new(1), OrderStatus::OnHold).await
                })
            })
            .collect();
        let results = futures::future::join_all(tasks).await;

        let applied = results
            .into_iter()
            .map(|r| r.unwrap().unwrap())
            .filter(|u| *u == StatusUpdate::Applied)
            .count();
        assert_eq!(applied, 1);
        assert_eq!(store.fulfillment_count(OrderId::new(1)).await, 1);
    }

    // ══════════════════════════════════════════════════════════════
    // Metadata and Attempts
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn metadata_is_written_on_the_order() {
        let store = InMemoryOrderStore::with_orders([order(1, OrderStatus::New)]);

        store
            .set_metadata(OrderId::new(1), "sparco_merchant_ref", "WC-r1-1")
            .await
            .unwrap();

        let stored = store.get(OrderId::new(1)).await.unwrap().unwrap();
        assert_eq!(stored.merchant_reference(), Some("WC-r1-1"));
    }

    #[tokio::test]
    async fn checkout_attempts_count_up_from_one() {
        let store = InMemoryOrderStore::with_orders([order(1, OrderStatus::New)]);

        assert_eq!(store.next_checkout_attempt(OrderId::new(1)).await.unwrap(), 1);
        assert_eq!(store.next_checkout_attempt(OrderId::new(1)).await.unwrap(), 2);
    }
}
