//! Webhook module - Sparco payment notifications.
//!
//! Parsing, event extraction, the status transition table and the outcome
//! reported back to the processor. Orchestration lives in
//! `application::handlers::HandlePaymentWebhookHandler`.

mod errors;
mod event;
mod outcome;
mod payload;
mod transition;

pub use errors::WebhookError;
pub use event::{PaymentStatus, WebhookEvent};
pub use outcome::{WebhookOutcome, WebhookResponse};
pub use payload::{declares_json, parse_payload, ParsedPayload, PayloadFormat};
pub use transition::StatusTransition;
