//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `OrderStore` - The shop's order system of record
//! - `HttpClient` - Outbound JSON POST used for checkout sessions

mod http_client;
mod order_store;

pub use http_client::{HttpClient, HttpResponse, TransportError};
pub use order_store::{OrderStore, StatusUpdate};
