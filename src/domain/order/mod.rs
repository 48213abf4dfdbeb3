//! Order module - lifecycle of the merchant orders the gateway drives.

mod errors;
mod merchant_reference;
#[allow(clippy::module_inception)]
mod order;
mod status;
mod transitions;

pub use errors::OrderError;
pub use merchant_reference::MerchantReference;
pub use order::{
    BillingDetails, Order, ShippingAddress, MERCHANT_REF_META_KEY, PAYMENT_URL_META_KEY,
};
pub use status::OrderStatus;
pub use transitions::{OrderStateMachine, TransitionApplied, MAX_TRANSITION_ATTEMPTS};
