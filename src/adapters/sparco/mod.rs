//! Sparco processor adapters.
//!
//! Implements the `HttpClient` port used to open checkout sessions:
//! - `ReqwestHttpClient` for real traffic (bounded redirects, per-request timeout)
//! - `MockHttpClient` for tests

mod mock_http_client;
mod reqwest_http_client;

pub use mock_http_client::{MockHttpClient, RecordedRequest};
pub use reqwest_http_client::{ReqwestHttpClient, DEFAULT_MAX_REDIRECTS};
