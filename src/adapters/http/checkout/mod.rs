//! HTTP adapter for opening Sparco checkout sessions.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, InitiateCheckoutRequest, PaymentResultResponse};
pub use handlers::{initiate_checkout, CheckoutApiError};
pub use routes::checkout_routes;
