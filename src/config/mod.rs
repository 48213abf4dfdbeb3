//! Gateway configuration.
//!
//! Settings come from `SPARCO_GATEWAY__`-prefixed environment variables (and a
//! `.env` file in development), with `__` between nesting levels:
//!
//! ```text
//! SPARCO_GATEWAY__SERVER__PORT=8080
//! SPARCO_GATEWAY__GATEWAY__PUBLIC_KEY=pk_live_...
//! SPARCO_GATEWAY__GATEWAY__SECRET_KEY=sk_live_...
//! SPARCO_GATEWAY__GATEWAY__WEBHOOK_URL=https://shop.example/api/webhooks/sparco
//! ```

mod error;
mod gateway;
mod server;

pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

const ENV_PREFIX: &str = "SPARCO_GATEWAY";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Processor keys, URLs and acknowledgement codes. Required.
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Reads configuration from the environment.
    ///
    /// Only parsing happens here; call [`AppConfig::validate`] before use.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let source = config::Environment::default()
            .prefix(ENV_PREFIX)
            .separator("__");

        Ok(config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?)
    }

    /// Semantic checks; production additionally requires HTTPS URLs.
    ///
    /// The request deadline must outlast the outbound checkout call, or the
    /// router would abandon a checkout mid-POST.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.gateway.validate(self.is_production())?;

        if self.server.request_timeout_secs <= self.gateway.checkout_timeout_secs {
            return Err(ValidationError::RequestTimeoutTooShort {
                request_secs: self.server.request_timeout_secs,
                checkout_secs: self.gateway.checkout_timeout_secs,
            });
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
