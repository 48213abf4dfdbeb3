//! Outbound HTTP client port.
//!
//! The checkout builder only needs one capability: POST a JSON body with a
//! timeout and read back the status and body. Redirect limits are a
//! property of the adapter.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Raw response from the remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Failure to obtain any HTTP response at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Too many redirects")]
    TooManyRedirects,

    #[error("Transport error: {0}")]
    Other(String),
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POST `body` as JSON to `url`, giving up after `timeout`.
    ///
    /// Any HTTP status is a successful transport result; only failures to
    /// obtain a response are errors.
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError>;
}
