//! Guarded order status transitions.
//!
//! `OrderStateMachine` decides whether a requested status change is legal
//! for the order's current status and writes it through the store's
//! compare-and-set operations. A lost race re-reads the order and decides
//! again, up to [`MAX_TRANSITION_ATTEMPTS`] times.

use std::sync::Arc;

use crate::domain::foundation::{OrderId, StateMachine};
use crate::ports::{OrderStore, StatusUpdate};

use super::{OrderError, OrderStatus};

/// Read-decide-write rounds before giving up on a contended order.
pub const MAX_TRANSITION_ATTEMPTS: usize = 3;

/// What a transition request did to the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionApplied {
    /// The order moved from `from` to the requested status.
    Applied { from: OrderStatus },

    /// The order already held the requested status.
    Unchanged,

    /// The requested status is not reachable from `current`.
    Skipped { current: OrderStatus },
}

/// Applies order status transitions through the order store.
#[derive(Clone)]
pub struct OrderStateMachine {
    store: Arc<dyn OrderStore>,
}

impl OrderStateMachine {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Moves the order to `target`, recording `note` on the order.
    ///
    /// Transitions to the current status and transitions the state machine
    /// forbids are reported, not treated as errors.
    pub async fn transition(
        &self,
        id: OrderId,
        target: OrderStatus,
        note: &str,
    ) -> Result<TransitionApplied, OrderError> {
        self.apply(id, target, Some(note)).await
    }

    /// Completes payment for the order.
    ///
    /// Goes through the store's idempotent `complete_payment` so fulfillment
    /// runs at most once however many times the event is delivered.
    pub async fn complete_payment(&self, id: OrderId) -> Result<TransitionApplied, OrderError> {
        self.apply(id, OrderStatus::Completed, None).await
    }

    async fn apply(
        &self,
        id: OrderId,
        target: OrderStatus,
        note: Option<&str>,
    ) -> Result<TransitionApplied, OrderError> {
        let mut last_seen = None;

        for attempt in 1..=MAX_TRANSITION_ATTEMPTS {
            let order = self
                .store
                .get(id)
                .await
                .map_err(|e| OrderError::from_store(id, e))?
                .ok_or(OrderError::NotFound(id))?;
            let current = order.status;

            if current == target {
                return Ok(TransitionApplied::Unchanged);
            }
            if !current.can_transition_to(&target) {
                return Ok(TransitionApplied::Skipped { current });
            }

            let update = match note {
                Some(note) => self.store.set_status(id, current, target, note).await,
                None => self.store.complete_payment(id, current).await,
            }
            .map_err(|e| OrderError::from_store(id, e))?;

            match update {
                StatusUpdate::Applied => return Ok(TransitionApplied::Applied { from: current }),
                StatusUpdate::AlreadyInState => return Ok(TransitionApplied::Unchanged),
                StatusUpdate::Conflict { current: now } => {
                    tracing::debug!(
                        order_id = %id,
                        expected = %current,
                        found = %now,
                        attempt,
                        "Order status changed underneath transition, retrying"
                    );
                    last_seen = Some(now);
                }
            }
        }

        Err(OrderError::concurrent_modification(
            id,
            last_seen.unwrap_or(target),
        ))
    }
}
