//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid socket address")]
    InvalidSocketAddr,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid checkout timeout")]
    InvalidCheckoutTimeout,

    #[error("Request timeout ({request_secs}s) must exceed the checkout timeout ({checkout_secs}s)")]
    RequestTimeoutTooShort { request_secs: u64, checkout_secs: u64 },

    #[error("Invalid URL for {0}")]
    InvalidUrl(&'static str),

    #[error("{0} must use HTTPS in production")]
    MustBeHttps(&'static str),

    #[error("Invalid acknowledgement status code: {0}")]
    InvalidStatusCode(u16),
}
