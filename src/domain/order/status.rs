//! Order status state machine.
//!
//! Defines the order lifecycle driven by checkout initiation and
//! processor webhooks.

use crate::domain::foundation::{StateMachine, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a merchant order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Created by the shop, no checkout session yet.
    New,

    /// Checkout session opened, awaiting the customer's payment.
    OnHold,

    /// Processor reports the payment is in flight.
    Processing,

    /// Payment captured. Terminal.
    Completed,

    /// Payment failed or the checkout session could not be opened. Terminal.
    Failed,
}

impl OrderStatus {
    /// Store-facing name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::OnHold => "on-hold",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Failed => "failed",
        }
    }

    /// Returns true if a checkout session may be opened for the order.
    pub fn accepts_checkout(&self) -> bool {
        matches!(self, OrderStatus::New | OrderStatus::OnHold)
    }
}

impl StateMachine for OrderStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use OrderStatus::*;
        matches!(
            (self, target),
            // From NEW (webhooks may skip intermediate events)
            (New, OnHold)
                | (New, Processing)
                | (New, Completed)
                | (New, Failed)
            // From ON_HOLD
                | (OnHold, Processing)
                | (OnHold, Completed)
                | (OnHold, Failed)
            // From PROCESSING
                | (Processing, Completed)
                | (Processing, Failed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use OrderStatus::*;
        match self {
            New => vec![OnHold, Processing, Completed, Failed],
            OnHold => vec![Processing, Completed, Failed],
            Processing => vec![Completed, Failed],
            Completed => vec![],
            Failed => vec![],
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" | "pending" => Ok(OrderStatus::New),
            "on-hold" => Ok(OrderStatus::OnHold),
            "processing" => Ok(OrderStatus::Processing),
            "completed" => Ok(OrderStatus::Completed),
            "failed" => Ok(OrderStatus::Failed),
            other => Err(ValidationError::invalid_format(
                "order_status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}
