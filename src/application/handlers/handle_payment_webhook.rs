//! HandlePaymentWebhookHandler - Command handler for Sparco payment notifications.

use std::sync::Arc;

use crate::domain::foundation::OrderId;
use crate::domain::order::{OrderStateMachine, TransitionApplied};
use crate::domain::signature::{FieldMap, SignatureCodec, SigningContext};
use crate::domain::webhook::{
    declares_json, parse_payload, PayloadFormat, StatusTransition, WebhookEvent, WebhookOutcome,
};
use crate::ports::OrderStore;

/// Command to handle a payment notification.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw request body.
    pub body: Vec<u8>,
    /// Declared `Content-Type`, if any.
    pub content_type: Option<String>,
}

/// Handler for processing Sparco payment notifications.
///
/// Verifies the notification's signature, resolves the order from the
/// merchant reference and applies the status transition table. Never
/// fails: every problem is folded into the returned [`WebhookOutcome`] so
/// the processor always receives an acknowledgement body.
pub struct HandlePaymentWebhookHandler {
    state_machine: OrderStateMachine,
    signing_context: SigningContext,
}

impl HandlePaymentWebhookHandler {
    pub fn new(store: Arc<dyn OrderStore>, signing_context: SigningContext) -> Self {
        Self {
            state_machine: OrderStateMachine::new(store),
            signing_context,
        }
    }

    pub async fn handle(&self, cmd: HandlePaymentWebhookCommand) -> WebhookOutcome {
        // 1. Parse body (JSON object first, then form pairs)
        let fields = self.parse(&cmd);

        // 2. Verify signature
        let verification = SignatureCodec::verify(&fields, &self.signing_context);
        if !verification.verified {
            tracing::warn!(
                has_signature = verification.received_signature.is_some(),
                field_count = fields.len(),
                "Webhook signature verification failed"
            );
            return WebhookOutcome::Unverified;
        }

        // 3. Extract event and order reference
        let event = match WebhookEvent::from_fields(&fields) {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(error = %err, "Verified webhook has no usable order reference");
                return WebhookOutcome::Failed(err);
            }
        };
        let order_id = event.merchant_reference.order_id();
        let transition = StatusTransition::for_status(&event.status);

        if event.is_error && transition == StatusTransition::CompletePayment {
            tracing::warn!(
                order_id = %order_id,
                merchant_reference = %event.merchant_reference,
                "Processor flagged a successful authorization as an error"
            );
        }

        // 4. Apply transition table
        let result = match (&transition, transition.target()) {
            (StatusTransition::CompletePayment, _) => {
                self.state_machine.complete_payment(order_id).await.map(Some)
            }
            (_, Some(target)) => self
                .state_machine
                .transition(order_id, target, transition.note().unwrap_or_default())
                .await
                .map(Some),
            (_, None) => {
                tracing::info!(
                    order_id = %order_id,
                    status = %event.status,
                    "Ignoring unrecognized payment status"
                );
                Ok(None)
            }
        };

        match result {
            Ok(applied) => {
                log_applied(order_id, &transition, applied);
                WebhookOutcome::Verified {
                    order_id,
                    transition,
                    applied,
                }
            }
            Err(err) => {
                tracing::error!(
                    order_id = %order_id,
                    status = %event.status,
                    error = %err,
                    "Failed to apply webhook status transition"
                );
                WebhookOutcome::Failed(err.into())
            }
        }
    }

    fn parse(&self, cmd: &HandlePaymentWebhookCommand) -> FieldMap {
        match parse_payload(&cmd.body) {
            Ok(parsed) => {
                if parsed.format == PayloadFormat::Form
                    && declares_json(cmd.content_type.as_deref())
                    && !cmd.body.is_empty()
                {
                    tracing::debug!("Webhook declared JSON but body is not a JSON object");
                }
                parsed.fields
            }
            Err(err) => {
                tracing::warn!(error = %err, "Unreadable webhook body, treating as empty");
                FieldMap::new()
            }
        }
    }
}

fn log_applied(order_id: OrderId, transition: &StatusTransition, applied: Option<TransitionApplied>) {
    match applied {
        Some(TransitionApplied::Applied { from }) => tracing::info!(
            order_id = %order_id,
            from = %from,
            response = transition.response_code(),
            "Order status updated from webhook"
        ),
        Some(TransitionApplied::Unchanged) => tracing::debug!(
            order_id = %order_id,
            response = transition.response_code(),
            "Duplicate webhook, order already in target status"
        ),
        Some(TransitionApplied::Skipped { current }) => tracing::info!(
            order_id = %order_id,
            current = %current,
            response = transition.response_code(),
            "Webhook transition not allowed from current status, skipped"
        ),
        None => {}
    }
}
