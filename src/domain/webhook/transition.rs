//! Payment status to order transition table.
//!
//! | Incoming status | Order action | Response code |
//! |---|---|---|
//! | `PROCESSING` | → processing | `PROCESSING` |
//! | `TXN_AUTH_SUCCESSFUL` | complete payment | `PROCESSED` |
//! | `TXN_AUTH_UNSUCCESSFUL` | → failed | `NOT_PROCESSED` |
//! | anything else | none | `UNRECOGNIZED` |

use super::PaymentStatus;
use crate::domain::order::OrderStatus;

/// Order action selected for an incoming payment status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusTransition {
    MarkProcessing,
    CompletePayment,
    MarkFailed,
    /// No action; carries the raw status for reporting.
    Unrecognized(String),
}

impl StatusTransition {
    /// Looks up the transition for a payment status.
    pub fn for_status(status: &PaymentStatus) -> Self {
        match status {
            PaymentStatus::Processing => StatusTransition::MarkProcessing,
            PaymentStatus::TxnAuthSuccessful => StatusTransition::CompletePayment,
            PaymentStatus::TxnAuthUnsuccessful => StatusTransition::MarkFailed,
            PaymentStatus::Unrecognized(raw) => StatusTransition::Unrecognized(raw.clone()),
        }
    }

    /// Order status this transition drives towards, if any.
    pub fn target(&self) -> Option<OrderStatus> {
        match self {
            StatusTransition::MarkProcessing => Some(OrderStatus::Processing),
            StatusTransition::CompletePayment => Some(OrderStatus::Completed),
            StatusTransition::MarkFailed => Some(OrderStatus::Failed),
            StatusTransition::Unrecognized(_) => None,
        }
    }

    /// Code reported back to the processor in the `status` field.
    pub fn response_code(&self) -> &'static str {
        match self {
            StatusTransition::MarkProcessing => "PROCESSING",
            StatusTransition::CompletePayment => "PROCESSED",
            StatusTransition::MarkFailed => "NOT_PROCESSED",
            StatusTransition::Unrecognized(_) => "UNRECOGNIZED",
        }
    }

    /// Order note written alongside a plain status change.
    ///
    /// Completion has none here: the store records its own note when it
    /// completes payment.
    pub fn note(&self) -> Option<&'static str> {
        match self {
            StatusTransition::MarkProcessing => Some("Payment processing. Via Webhook"),
            StatusTransition::MarkFailed => Some("Payment failed. Via Webhook"),
            StatusTransition::CompletePayment | StatusTransition::Unrecognized(_) => None,
        }
    }
}
