//! # Herald Configuration
//!
//! Runtime configuration for a `Messenger`. All fields have defaults; the
//! environment can override them.

use herald_bus::DEFAULT_CHANNEL_CAPACITY;
use herald_types::DEFAULT_EMITTER;
use std::env;
use thiserror::Error;
use tracing::warn;

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The default emitter name is empty.
    #[error("Default emitter must not be empty")]
    EmptyEmitter,

    /// The default emitter name contains the event name separator.
    #[error("Default emitter must not contain ':' (got {0:?})")]
    InvalidEmitter(String),

    /// The bus channel capacity is zero.
    #[error("Channel capacity must be greater than zero")]
    ZeroCapacity,
}

/// Messenger configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeraldConfig {
    /// Emitter name used when a message does not name one.
    pub default_emitter: String,
    /// Capacity of the in-memory bus channel.
    pub channel_capacity: usize,
    /// Whether host errors are trapped into error messages from the start.
    pub catch_errors: bool,
    /// Icon used for trapped host errors.
    pub error_icon: String,
    /// Icon used by `warn`.
    pub warn_icon: String,
}

impl Default for HeraldConfig {
    fn default() -> Self {
        Self {
            default_emitter: DEFAULT_EMITTER.to_string(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            catch_errors: false,
            error_icon: "error".to_string(),
            warn_icon: "alert".to_string(),
        }
    }
}

impl HeraldConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `HERALD_DEFAULT_EMITTER`: Default emitter (default: global)
    /// - `HERALD_CHANNEL_CAPACITY`: Bus capacity (default: 1000)
    /// - `HERALD_CATCH_ERRORS`: Trap host errors (default: false)
    ///
    /// Unparseable or invalid values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            default_emitter: env::var("HERALD_DEFAULT_EMITTER")
                .ok()
                .filter(|v| match validate_emitter(v) {
                    Ok(()) => true,
                    Err(error) => {
                        warn!(%error, "Ignoring HERALD_DEFAULT_EMITTER");
                        false
                    }
                })
                .unwrap_or(defaults.default_emitter),

            channel_capacity: env::var("HERALD_CHANNEL_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.channel_capacity),

            catch_errors: env::var("HERALD_CATCH_ERRORS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.catch_errors),

            ..defaults
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_emitter(&self.default_emitter)?;
        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// Replace every invalid field with its default.
    ///
    /// Dispatch never fails, so a bad configuration degrades to defaults
    /// with a warning instead of refusing to build a messenger.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if let Err(error) = validate_emitter(&self.default_emitter) {
            warn!(%error, fallback = DEFAULT_EMITTER, "Invalid default emitter");
            self.default_emitter = DEFAULT_EMITTER.to_string();
        }
        if self.channel_capacity == 0 {
            warn!(
                error = %ConfigError::ZeroCapacity,
                fallback = DEFAULT_CHANNEL_CAPACITY,
                "Invalid channel capacity"
            );
            self.channel_capacity = DEFAULT_CHANNEL_CAPACITY;
        }
        self
    }
}

/// An emitter is non-empty and never contains the event name separator.
fn validate_emitter(emitter: &str) -> Result<(), ConfigError> {
    if emitter.is_empty() {
        return Err(ConfigError::EmptyEmitter);
    }
    if emitter.contains(':') {
        return Err(ConfigError::InvalidEmitter(emitter.to_string()));
    }
    Ok(())
}
