//! Sparco gateway configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::CheckoutSettings;
use crate::domain::checkout::CHECKOUT_PATH;
use crate::domain::signature::SigningContext;

/// Sparco processor settings
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Merchant public key sent with checkout requests
    pub public_key: String,

    /// Merchant secret key used to verify webhook signatures
    pub secret_key: SecretString,

    /// Processor base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Public URL of this service's webhook endpoint, given to the processor
    pub webhook_url: String,

    /// Text shown to the customer after checkout
    #[serde(default)]
    pub instructions: String,

    /// Timeout for the outbound checkout call in seconds
    #[serde(default = "default_checkout_timeout")]
    pub checkout_timeout_secs: u64,

    /// Redirects followed by the outbound checkout call
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// HTTP status acknowledging a verified notification
    #[serde(default = "default_ack_status")]
    pub ack_status_code: u16,

    /// HTTP status acknowledging a notification that failed verification
    #[serde(default = "default_ack_status")]
    pub unverified_status_code: u16,
}

impl GatewayConfig {
    /// Creates a configuration with default optional settings.
    pub fn new(
        public_key: impl Into<String>,
        secret_key: impl Into<String>,
        webhook_url: impl Into<String>,
    ) -> Self {
        Self {
            public_key: public_key.into(),
            secret_key: SecretString::new(secret_key.into()),
            base_url: default_base_url(),
            webhook_url: webhook_url.into(),
            instructions: String::new(),
            checkout_timeout_secs: default_checkout_timeout(),
            max_redirects: default_max_redirects(),
            ack_status_code: default_ack_status(),
            unverified_status_code: default_ack_status(),
        }
    }

    /// Set a custom processor base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Full URL of the processor's checkout endpoint.
    pub fn checkout_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), CHECKOUT_PATH)
    }

    pub fn checkout_timeout(&self) -> Duration {
        Duration::from_secs(self.checkout_timeout_secs)
    }

    /// Settings the checkout handler sends with every request.
    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            public_key: self.public_key.clone(),
            webhook_url: self.webhook_url.clone(),
            checkout_url: self.checkout_url(),
            timeout: self.checkout_timeout(),
        }
    }

    /// Signing context for verifying inbound notifications.
    pub fn signing_context(&self) -> SigningContext {
        SigningContext::from_secret(self.public_key.clone(), self.secret_key.clone())
    }

    /// Validate gateway configuration
    ///
    /// HTTPS is required for the processor and webhook URLs in production.
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if self.public_key.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__PUBLIC_KEY"));
        }
        if self.secret_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__SECRET_KEY"));
        }
        if self.webhook_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__WEBHOOK_URL"));
        }

        check_url("base_url", &self.base_url, production)?;
        check_url("webhook_url", &self.webhook_url, production)?;

        if self.checkout_timeout_secs == 0 || self.checkout_timeout_secs > 300 {
            return Err(ValidationError::InvalidCheckoutTimeout);
        }
        for code in [self.ack_status_code, self.unverified_status_code] {
            if !(200..=599).contains(&code) {
                return Err(ValidationError::InvalidStatusCode(code));
            }
        }
        Ok(())
    }
}

fn check_url(name: &'static str, url: &str, production: bool) -> Result<(), ValidationError> {
    let https = url.starts_with("https://");
    if !https && !url.starts_with("http://") {
        return Err(ValidationError::InvalidUrl(name));
    }
    if production && !https {
        return Err(ValidationError::MustBeHttps(name));
    }
    Ok(())
}

fn default_base_url() -> String {
    "https://checkout.sparco.io".to_string()
}

fn default_checkout_timeout() -> u64 {
    60
}

fn default_max_redirects() -> usize {
    5
}

fn default_ack_status() -> u16 {
    201
}
