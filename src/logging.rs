//! Tracing subscriber setup
//!
//! Logs go to stderr so the terminal widget owns stdout. `RUST_LOG` takes
//! precedence over the configured level.

use crate::config::LoggingConfig;
use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset. Covers the request spans of the
/// web server's trace layer as well as this crate.
fn default_directive(config: &LoggingConfig) -> String {
    format!("kweather={level},tower_http={level}", level = config.level)
}

pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(config)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    }
    .map_err(|e| anyhow!("Failed to initialise logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_includes_http_traces() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            ..LoggingConfig::default()
        };
        let directive = default_directive(&config);
        assert_eq!(directive, "kweather=debug,tower_http=debug");
        assert!(EnvFilter::try_new(&directive).is_ok());
    }
}
