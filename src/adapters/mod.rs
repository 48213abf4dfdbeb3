//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum routes for webhooks and checkout
//! - `memory` - In-memory order store
//! - `sparco` - Outbound HTTP clients for the Sparco checkout API

pub mod http;
pub mod memory;
pub mod sparco;

pub use http::{api_router, GatewayAppState};
pub use memory::InMemoryOrderStore;
pub use sparco::{MockHttpClient, ReqwestHttpClient};
