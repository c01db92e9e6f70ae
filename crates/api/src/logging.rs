//! Tracing subscriber setup.

use tabula_core::{Error, Result};
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Builds the filter: `RUST_LOG` when set, the configured directives
/// otherwise, `info` if those do not parse.
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| configured_filter(config))
}

/// The configured directives, ignoring `RUST_LOG`.
fn configured_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global fmt subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_ansi(config.ansi)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| Error::internal(format!("failed to install logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_fails() {
        let config = LogConfig {
            filter: "tabula_api=debug".into(),
            ansi: false,
        };
        // Another test binary may have installed one already; only the
        // second call in this process is guaranteed to fail.
        let _ = init(&config);
        assert!(init(&config).is_err());
    }

    #[test]
    fn test_configured_filter() {
        let config = LogConfig {
            filter: "tabula_api=debug".into(),
            ansi: false,
        };
        assert_eq!(configured_filter(&config).to_string(), "tabula_api=debug");
    }

    #[test]
    fn test_bad_filter_falls_back() {
        let config = LogConfig {
            filter: "tabula_api=loud".into(),
            ansi: false,
        };
        assert_eq!(configured_filter(&config).to_string(), "info");
    }
}
