//! HTTP adapter for Sparco payment notifications.

mod handlers;
mod routes;

pub use handlers::handle_sparco_webhook;
pub use routes::webhook_routes;
