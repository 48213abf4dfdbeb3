//! Checkout module - opening Sparco checkout sessions for orders.

mod errors;
mod outcome;
mod request;

pub use errors::CheckoutError;
pub use outcome::CheckoutOutcome;
pub use request::{CheckoutApiResponse, CheckoutRequest, CHECKOUT_PATH};
