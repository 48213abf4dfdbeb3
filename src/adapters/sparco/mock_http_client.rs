//! Mock HTTP client for testing.
//!
//! Replays queued responses in order and records every request so tests
//! can assert on the URL, body and timeout the checkout builder used.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::ports::{HttpClient, HttpResponse, TransportError};

/// Recorded request for assertions.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub body: Value,
    pub timeout: Duration,
}

#[derive(Default)]
struct MockState {
    responses: VecDeque<Result<HttpResponse, TransportError>>,
    requests: Vec<RecordedRequest>,
}

/// Scripted `HttpClient`.
///
/// # Example
///
/// ```ignore
/// let client = MockHttpClient::new();
/// client.respond_json(200, json!({"paymentUrl": "https://pay", "isError": false}));
/// client.fail_with(TransportError::Timeout);
/// ```
#[derive(Default, Clone)]
pub struct MockHttpClient {
    inner: Arc<Mutex<MockState>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response.
    pub fn respond(&self, status: u16, body: impl Into<String>) {
        self.inner
            .lock()
            .unwrap()
            .responses
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    /// Queue a JSON response.
    pub fn respond_json(&self, status: u16, body: Value) {
        self.respond(status, body.to_string());
    }

    /// Queue a transport failure.
    pub fn fail_with(&self, error: TransportError) {
        self.inner.lock().unwrap().responses.push_back(Err(error));
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        let mut state = self.inner.lock().unwrap();
        state.requests.push(RecordedRequest {
            url: url.to_string(),
            body: body.clone(),
            timeout,
        });
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no response queued".to_string())))
    }
}
