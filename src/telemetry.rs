//! Log subscriber initialisation.

use crate::config::LoggingConfig;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt};

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter directive is invalid.
    #[error("invalid log filter '{directive}': {reason}")]
    InvalidFilter {
        /// Directive that failed to parse.
        directive: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber is already installed.
    #[error("log subscriber already installed: {0}")]
    AlreadyInstalled(String),
}

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over [`LoggingConfig::level`].
///
/// # Errors
///
/// Returns [`TelemetryError`] when the level directive is invalid or a
/// subscriber has already been installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let env_directive = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = resolve_filter(env_directive.as_deref(), &config.level)?;

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json {
        builder.json().flatten_event(true).try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|err| TelemetryError::AlreadyInstalled(err.to_string()))
}

/// A valid environment directive wins; otherwise the configured level must parse.
fn resolve_filter(env_directive: Option<&str>, level: &str) -> Result<EnvFilter, TelemetryError> {
    if let Some(filter) = env_directive.and_then(|directive| EnvFilter::try_new(directive).ok()) {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|err| TelemetryError::InvalidFilter {
        directive: level.to_owned(),
        reason: err.to_string(),
    })
}
