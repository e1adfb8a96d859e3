//! Logging for the oracle gateway
//!
//! Installs a `tracing-subscriber` fmt layer in text or JSON form behind an
//! `EnvFilter`

use oracle_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the configuration set one
const DEFAULT_FILTER: &str = "info";

/// Initialize logging from configuration
///
/// `RUST_LOG` wins over the configured filter. An unparseable directive
/// falls back to `info`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: Option<&TelemetryConfig>) -> anyhow::Result<()> {
    let directive = filter_directive(config, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let format = config.map_or(LogFormat::Text, |c| c.format);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json().flatten_event(true))
            .try_init()?,
    }

    Ok(())
}

/// Pick the filter directive: `RUST_LOG`, then config, then the default
fn filter_directive(config: Option<&TelemetryConfig>, rust_log: Option<String>) -> String {
    rust_log
        .filter(|value| !value.trim().is_empty())
        .or_else(|| config.map(|c| c.filter.clone()).filter(|f| !f.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_FILTER.to_owned())
}
