//! # Logging
//!
//! Installs a `tracing-subscriber` formatter driven by [`LoggingConfig`].
//!
//! `RUST_LOG` directives take precedence; the configured level is only the
//! default for targets that `RUST_LOG` does not mention.

use crate::config::LoggingConfig;
use crate::error::{CodecError, Result};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Build the env filter for `config`
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.log_level).into())
        .from_env_lossy()
}

/// Install the global subscriber.
///
/// Fails if a global subscriber has already been set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(config.with_target);

    let installed = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| CodecError::ConfigError(format!("Failed to install logger: {e}")))?;

    info!(app = %config.app_name, level = %config.log_level, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let config = LoggingConfig::default();
        // Another test may already own the global subscriber.
        let _ = init_logging(&config);
        assert!(matches!(
            init_logging(&config),
            Err(CodecError::ConfigError(_))
        ));
    }
}
