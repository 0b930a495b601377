//! Logging setup for hosts embedding the base library.
//!
//! Applications built on Quill normally install their own subscriber;
//! this module provides a small default so tools and tests get readable
//! output without wiring up `tracing-subscriber` themselves.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Global initialization flag so a subscriber is only installed once
static INIT: Once = Once::new();

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset, e.g. `"info"`
    pub default_filter: String,

    /// Emit compact single-line output instead of the full format
    pub compact: bool,

    /// Include target (module path) in each event
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            compact: true,
            with_target: false,
        }
    }
}

/// Install a global `tracing` subscriber from the given configuration.
///
/// Safe to call multiple times; only the first call has any effect. The
/// `RUST_LOG` environment variable overrides `default_filter`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.default_filter.clone()));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.with_target);

        if config.compact {
            // A subscriber may already be set by the host; ignore the error.
            let _ = builder.compact().try_init();
        } else {
            let _ = builder.try_init();
        }
    });
}

/// Initialize logging with default configuration
pub fn init_default_logging() {
    init_logging(LoggingConfig::default());
}

/// Check if logging has been initialized through this module
pub fn is_logging_initialized() -> bool {
    INIT.is_completed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.default_filter, "info");
        assert!(config.compact);
        assert!(!config.with_target);
    }

    #[test]
    fn test_init_is_idempotent() {
        init_default_logging();
        init_default_logging();
        assert!(is_logging_initialized());
    }
}
