//! Bot configuration loaded from TOML.
//!
//! Every section has defaults so a minimal file only needs the database URL:
//!
//! ```toml
//! prefix = "+nxc"
//! invite_link = "https://example.invalid/invite"
//!
//! [database]
//! url = "postgres://localhost/nexus"
//!
//! [event_role]
//! confirmation_timeout_secs = 60
//! cache_refresh = "when_empty"
//!
//! [logging]
//! level = "info"
//! json = true
//! ```

use crate::event_role::services::CacheRefreshPolicy;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PREFIX: &str = "+nxc";
const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_CONNECTIONS: u32 = 4;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML or does not match the schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is not acceptable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Trigger prefix that every bot command starts with.
    pub prefix: String,
    /// Link posted in reply to the `invite` command.
    pub invite_link: Option<String>,
    /// Binding store connection settings.
    pub database: DatabaseConfig,
    /// Event-role behaviour.
    pub event_role: EventRoleConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_owned(),
            invite_link: None,
            database: DatabaseConfig::default(),
            event_role: EventRoleConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl BotConfig {
    /// Reads and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed or
    /// validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Parses and validates TOML configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for unacceptable values.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.prefix.trim().is_empty() || self.prefix.contains(char::is_whitespace) {
            return Err(ConfigError::Invalid(
                "prefix must be a single non-empty word".to_owned(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Binding store connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Pool size.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Event-role behaviour settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EventRoleConfig {
    /// How long a confirmation notice waits for its dismissal reaction.
    pub confirmation_timeout_secs: u64,
    /// When the binding cache reloads from the store.
    pub cache_refresh: CacheRefreshPolicy,
}

impl EventRoleConfig {
    /// Returns the confirmation wait as a [`Duration`].
    #[must_use]
    pub const fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }
}

impl Default for EventRoleConfig {
    fn default() -> Self {
        Self {
            confirmation_timeout_secs: DEFAULT_CONFIRMATION_TIMEOUT_SECS,
            cache_refresh: CacheRefreshPolicy::default(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}
