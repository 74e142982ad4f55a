//! Logging initialization
//!
//! Installs the global `tracing` subscriber. A non-empty `RUST_LOG` wins
//! over the configured filter and must parse. Calling `init` more than
//! once is harmless: only the first successful call installs a subscriber.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },
}

/// Install the global subscriber described by `config`.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_filter(config)?;

    // An already-installed subscriber (tests, embedding) is not an error.
    let _ = match config.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .try_init(),
    };

    Ok(())
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(from_env.as_deref(), &config.filter)
}

/// A set but malformed `RUST_LOG` is an error rather than a silent fallback.
fn filter_from(from_env: Option<&str>, configured: &str) -> Result<EnvFilter, LoggingError> {
    let directives = match from_env {
        Some(value) if !value.trim().is_empty() => value,
        _ => configured,
    };

    EnvFilter::try_new(directives).map_err(|e| LoggingError::Filter {
        filter: directives.to_string(),
        reason: e.to_string(),
    })
}
