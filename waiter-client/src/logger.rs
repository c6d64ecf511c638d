//! Logging Infrastructure
//!
//! Console logging for the terminal process. `RUST_LOG` wins over the
//! configured level when set.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::ClientConfig;

/// Pick the active filter: a valid `RUST_LOG` value, else `level`
fn resolve_filter(level: &str, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `json_format` - JSON lines instead of human-readable output
///
/// Fails if a global subscriber is already installed.
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = resolve_filter(level, rust_log.as_deref());
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if json_format {
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true);
        subscriber.with(console_layer).try_init()?;
    } else {
        let console_layer = fmt::layer().with_target(false).with_thread_ids(false);
        subscriber.with(console_layer).try_init()?;
    }

    Ok(())
}

/// Initialize logging from [`ClientConfig::log_level`]
pub fn init_logger_from_config(config: &ClientConfig) -> anyhow::Result<()> {
    init_logger(&config.log_level, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_rust_log_widens_configured_level() {
        let filter = resolve_filter("info", Some("debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_rust_log_narrows_configured_level() {
        let filter = resolve_filter("debug", Some("warn"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_configured_level_when_rust_log_unusable() {
        for rust_log in [None, Some(""), Some("  "), Some("waiter_client=loudest")] {
            let filter = resolve_filter("warn", rust_log);
            assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
        }
    }

    #[test]
    fn test_second_init_is_an_error() {
        let config = ClientConfig::new().with_log_level("debug");
        // another test may have installed a subscriber first
        let _ = init_logger_from_config(&config);
        assert!(init_logger("info", true).is_err());
    }
}
