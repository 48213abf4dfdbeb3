//! `reqwest` implementation of the outbound HTTP port.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::ports::{HttpClient, HttpResponse, TransportError};

/// Redirects followed when none is configured.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// HTTP client backed by a shared `reqwest::Client`.
///
/// The redirect limit is fixed at construction; the timeout is applied per
/// request.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    http_client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Builds a client that follows at most `max_redirects` redirects.
    pub fn new(max_redirects: usize) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(max_redirects))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(Self { http_client })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_redirect() {
        TransportError::TooManyRedirects
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        let response = self
            .http_client
            .post(url)
            .json(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        Ok(HttpResponse { status, body })
    }
}
