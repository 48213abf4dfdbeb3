//! Signing context passed explicitly to every codec call.

use secrecy::SecretString;

/// Keys and timestamp a signature is produced or checked under.
///
/// Held by value and passed per call. Verification returns a resolved copy
/// rather than mutating the caller's context.
#[derive(Debug, Clone)]
pub struct SigningContext {
    pub public_key: String,
    pub secret_key: SecretString,
    pub timestamp: Option<i64>,
}

impl SigningContext {
    pub fn new(public_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            secret_key: SecretString::new(secret_key.into()),
            timestamp: None,
        }
    }

    /// Builds a context from keys already held as secrets.
    pub fn from_secret(public_key: impl Into<String>, secret_key: SecretString) -> Self {
        Self {
            public_key: public_key.into(),
            secret_key,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
