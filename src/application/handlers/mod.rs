//! Application handlers.
//!
//! Command handlers for the two Sparco flows: opening a checkout session
//! and processing the processor's payment notifications.

mod handle_payment_webhook;
mod initiate_checkout;

pub use handle_payment_webhook::{HandlePaymentWebhookCommand, HandlePaymentWebhookHandler};
pub use initiate_checkout::{CheckoutSettings, InitiateCheckoutCommand, InitiateCheckoutHandler};
