//! Logging setup
//!
//! Logs go to stderr so the forecast on stdout stays clean. `RUST_LOG`
//! takes precedence over the configured level and `-v` flags.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LOG_LEVELS, LoggingConfig};

/// Level after raising `configured` by `verbose` steps, capped at trace
#[must_use]
pub fn effective_level(configured: &str, verbose: u8) -> &'static str {
    let base = LOG_LEVELS
        .iter()
        .position(|level| *level == configured)
        .unwrap_or(1);
    let index = (base + usize::from(verbose)).min(LOG_LEVELS.len() - 1);
    LOG_LEVELS[index]
}

/// Install the global subscriber
pub fn init(config: &LoggingConfig, verbose: u8) -> Result<()> {
    let level = effective_level(&config.level, verbose);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("warn", 0, "warn")]
    #[case("warn", 1, "info")]
    #[case("warn", 2, "debug")]
    #[case("warn", 9, "trace")]
    #[case("error", 1, "warn")]
    #[case("trace", 1, "trace")]
    #[case("bogus", 0, "warn")]
    fn test_effective_level(#[case] configured: &str, #[case] verbose: u8, #[case] expected: &str) {
        assert_eq!(effective_level(configured, verbose), expected);
    }
}
