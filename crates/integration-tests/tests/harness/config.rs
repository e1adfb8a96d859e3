//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use oracle_config::{Config, CorsConfig, HealthConfig, OracleConfig, ServerConfig};
use secrecy::SecretString;

/// Builder for constructing test configurations
///
/// Environment lookups for both providers are disabled, so only providers
/// added through the builder hold a credential.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with no providers
    pub fn new() -> Self {
        let mut oracle = OracleConfig::default();
        oracle.groq.api_key_env = Some(String::new());
        oracle.gemini.api_key_env = Some(String::new());

        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                oracle,
                telemetry: None,
            },
        }
    }

    /// Give Groq a key and point it at a mock backend
    pub fn with_groq(mut self, base_url: &str) -> Self {
        self.config.oracle.groq.api_key = Some(SecretString::from("test-groq-key"));
        self.config.oracle.groq.base_url = Some(base_url.parse().expect("valid URL"));
        self
    }

    /// Give Gemini a key and point it at a mock backend
    pub fn with_gemini(mut self, base_url: &str) -> Self {
        self.config.oracle.gemini.api_key = Some(SecretString::from("test-gemini-key"));
        self.config.oracle.gemini.base_url = Some(base_url.parse().expect("valid URL"));
        self
    }

    /// Probability of Groq being primary; 1.0 and 0.0 make the order fixed
    pub fn with_primary_weight(mut self, weight: f64) -> Self {
        self.config.oracle.primary_weight = weight;
        self
    }

    /// Per-call provider deadline
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.config.oracle.timeout_seconds = seconds;
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = config;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
