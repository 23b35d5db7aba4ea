//! Structured logging setup
//!
//! Diagnostics go through `tracing` and are written to stderr so that lists
//! printed on stdout stay machine-readable.
//!
//! - `RUST_LOG` takes precedence over the configured level when set
//! - `DEP_HARVEST_LOG_JSON=true` switches to JSON lines
//! - Initialization happens once; later calls are ignored

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable enabling JSON output
pub const LOG_JSON_ENV: &str = "DEP_HARVEST_LOG_JSON";

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Minimum level for this crate's events
    pub level: Level,
    /// Use JSON output format
    pub use_json: bool,
    /// Include the module target in each line
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: false,
        }
    }
}

impl LoggingConfig {
    /// Build the configuration from the global CLI verbosity flags
    ///
    /// `quiet` wins over `verbose`.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        let level = if quiet {
            Level::WARN
        } else if verbose {
            Level::DEBUG
        } else {
            Level::INFO
        };

        Self {
            level,
            use_json: json_requested(),
            include_target: verbose,
        }
    }

    /// Filter directives used when `RUST_LOG` is unset
    fn default_directives(&self) -> String {
        format!(
            "warn,dep_harvest={}",
            self.level.to_string().to_lowercase()
        )
    }
}

fn json_requested() -> bool {
    env::var(LOG_JSON_ENV)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Initializes the logging system with the provided configuration
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = match env::var(EnvFilter::DEFAULT_ENV) {
            Ok(_) => EnvFilter::from_default_env(),
            Err(_) => EnvFilter::new(config.default_directives()),
        };

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target),
                )
                .init();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags_levels() {
        assert_eq!(LoggingConfig::from_flags(false, false).level, Level::INFO);
        assert_eq!(LoggingConfig::from_flags(true, false).level, Level::DEBUG);
        assert_eq!(LoggingConfig::from_flags(false, true).level, Level::WARN);
        assert_eq!(LoggingConfig::from_flags(true, true).level, Level::WARN);
    }

    #[test]
    fn test_default_directives() {
        let config = LoggingConfig::from_flags(true, false);
        assert_eq!(config.default_directives(), "warn,dep_harvest=debug");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::default());
    }
}
