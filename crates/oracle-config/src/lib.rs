#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
mod loader;
pub mod oracle;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use cors::*;
pub use oracle::*;
pub use server::*;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level oracle gateway configuration
///
/// Every section is optional; an empty file (or no file at all) yields a
/// gateway that reads `GROQ_API_KEY` and `GEMINI_API_KEY` per request.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Oracle endpoint and provider configuration
    #[serde(default)]
    pub oracle: OracleConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert!(config.server.listen_address.is_none());
        assert!(config.server.health.enabled);
        assert_eq!(config.oracle.path, "/api/oracle");
        assert!((config.oracle.primary_weight - 0.85).abs() < f64::EPSILON);
        assert!(config.telemetry.is_none());
    }

    #[test]
    fn full_document() {
        let toml = r#"
            [server]
            listen_address = "127.0.0.1:8080"

            [server.health]
            enabled = false

            [server.cors]
            allow_origin = "https://oracle.example"

            [oracle]
            path = "/oracle"
            primary_weight = 0.5
            timeout_seconds = 10

            [oracle.groq]
            api_key = "gsk-test"
            model = "llama-3.1-8b-instant"

            [oracle.gemini]
            api_key_env = "ORACLE_GEMINI_KEY"

            [telemetry]
            filter = "debug"
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.server.listen_address.unwrap().port(), 8080);
        assert!(!config.server.health.enabled);
        assert_eq!(config.server.cors.allow_origin, "https://oracle.example");
        assert_eq!(config.server.cors.allow_methods, "POST, OPTIONS");
        assert_eq!(config.oracle.path, "/oracle");
        assert_eq!(config.oracle.timeout_seconds, 10);
        assert_eq!(config.oracle.groq.model.as_deref(), Some("llama-3.1-8b-instant"));
        assert_eq!(config.oracle.gemini.api_key_env.as_deref(), Some("ORACLE_GEMINI_KEY"));

        let telemetry = config.telemetry.unwrap();
        assert_eq!(telemetry.filter, "debug");
        assert_eq!(telemetry.format, LogFormat::Json);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = toml::from_str::<Config>("[oracle]\nretries = 3\n");
        assert!(result.is_err());
    }
}
