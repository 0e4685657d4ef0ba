//! # Severity Levels
//!
//! The closed set of levels used to route a message. The level only builds
//! the event name suffix (`<emitter>:<level>`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity level of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Level {
    /// Plain informational message (code 1).
    #[default]
    #[serde(rename = "message")]
    Message,
    /// Warning (code 2).
    #[serde(rename = "warn")]
    Warning,
    /// Error (code 3).
    #[serde(rename = "error")]
    Error,
    /// Message that holds for a minimum time and/or removes itself (code 4).
    #[serde(rename = "statusmessage")]
    StatusMessage,
}

impl Level {
    /// All levels, in code order.
    pub const ALL: [Level; 4] = [
        Level::Message,
        Level::Warning,
        Level::Error,
        Level::StatusMessage,
    ];

    /// Resolve a raw level code.
    ///
    /// Total: any code outside `1..=4` falls back to `Level::Message`.
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            2 => Self::Warning,
            3 => Self::Error,
            4 => Self::StatusMessage,
            _ => Self::Message,
        }
    }

    /// Resolve an optional raw level code, defaulting when absent.
    #[must_use]
    pub fn resolve(code: Option<i64>) -> Self {
        code.map(Self::from_code).unwrap_or_default()
    }

    /// The numeric code of this level.
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Message => 1,
            Self::Warning => 2,
            Self::Error => 3,
            Self::StatusMessage => 4,
        }
    }

    /// The event name suffix for this level.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Warning => "warn",
            Self::Error => "error",
            Self::StatusMessage => "statusmessage",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown level name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown level name: {0}")]
pub struct UnknownLevel(pub String);

impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.name() == s)
            .ok_or_else(|| UnknownLevel(s.to_string()))
    }
}
