//! Result of handling one payment notification.

use serde::{Deserialize, Serialize};

use super::{StatusTransition, WebhookError};
use crate::domain::foundation::OrderId;
use crate::domain::order::TransitionApplied;

/// What happened to a notification.
///
/// Every delivery ends in exactly one of these; the transport layer maps the
/// variant to an acknowledgement status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Signature checked out and the transition table was applied.
    Verified {
        order_id: OrderId,
        transition: StatusTransition,
        /// `None` when the status was unrecognized and nothing was attempted.
        applied: Option<TransitionApplied>,
    },

    /// Signature did not check out. No order was touched.
    Unverified,

    /// Signature checked out but the order could not be resolved or updated.
    Failed(WebhookError),
}

impl WebhookOutcome {
    pub fn is_verified(&self) -> bool {
        !matches!(self, WebhookOutcome::Unverified)
    }

    /// Builds the acknowledgement body sent back to the processor.
    pub fn to_response(&self) -> WebhookResponse {
        match self {
            WebhookOutcome::Verified { transition, .. } => WebhookResponse {
                webhook_payload_verified: true,
                status: Some(transition.response_code().to_string()),
                err_msg: None,
            },
            WebhookOutcome::Unverified => WebhookResponse {
                webhook_payload_verified: false,
                status: None,
                err_msg: None,
            },
            WebhookOutcome::Failed(err) => WebhookResponse {
                webhook_payload_verified: true,
                status: None,
                err_msg: Some(err.to_string()),
            },
        }
    }
}

/// Acknowledgement body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub webhook_payload_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err_msg: Option<String>,
}
