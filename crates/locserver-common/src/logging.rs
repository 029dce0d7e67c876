//! Structured logging infrastructure for locserver

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "locserver_i18n=trace")
    pub level: String,
    /// Whether to include target module information
    pub include_targets: bool,
    /// Whether to include timestamps
    pub include_timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            include_targets: true,
            include_timestamps: true,
        }
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Falls back to the `info` level if the configured filter does not parse.
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_new(&config.level)
        .or_else(|_| EnvFilter::try_new("info"))
        .expect("static fallback filter is valid");

    let layer = fmt::layer().with_target(config.include_targets);

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.include_timestamps {
        registry.with(layer).try_init()?;
    } else {
        registry.with(layer.without_time()).try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_info_level() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.include_targets);
    }
}
