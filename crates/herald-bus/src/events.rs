//! # Message Events
//!
//! The event type that flows through the bus, its name and scope, and the
//! filter subscribers use to pick the events they render.

use herald_types::{Level, MessageFuture};
use std::fmt;

/// Where an event is published.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// The process-wide scope.
    #[default]
    Global,
    /// A caller-chosen alternate scope.
    Target(String),
}

impl Scope {
    /// `Target` when a target is given, `Global` otherwise.
    #[must_use]
    pub fn from_target(target: Option<&str>) -> Self {
        match target {
            Some(t) if !t.is_empty() => Self::Target(t.to_string()),
            _ => Self::Global,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Target(t) => f.write_str(t),
        }
    }
}

/// Event name: `<emitter>:<level>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventName {
    pub emitter: String,
    pub level: Level,
}

impl EventName {
    #[must_use]
    pub fn new(emitter: impl Into<String>, level: Level) -> Self {
        Self {
            emitter: emitter.into(),
            level,
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.emitter, self.level.name())
    }
}

/// An event published for a dispatched message.
///
/// The payload is the future itself; the presentation layer reads its
/// metadata and `content`, renders, and settles it.
#[derive(Debug, Clone)]
pub struct MessageEvent {
    pub scope: Scope,
    pub name: EventName,
    pub message_promise: MessageFuture,
}

impl MessageEvent {
    /// Build the event for a future from its own metadata.
    #[must_use]
    pub fn for_future(message_promise: MessageFuture) -> Self {
        let metadata = message_promise.metadata();
        Self {
            scope: Scope::from_target(metadata.target.as_deref()),
            name: EventName::new(metadata.emitter.clone(), metadata.level),
            message_promise,
        }
    }

    pub fn level(&self) -> Level {
        self.name.level
    }

    pub fn emitter(&self) -> &str {
        &self.name.emitter
    }
}

/// Filter for subscribing to specific events.
///
/// Every non-empty criterion must match; empty means "any".
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Scopes to include.
    pub scopes: Vec<Scope>,
    /// Emitter names to include.
    pub emitters: Vec<String>,
    /// Levels to include.
    pub levels: Vec<Level>,
    /// Full event names (`emitter:level`) to include.
    pub names: Vec<String>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific levels.
    #[must_use]
    pub fn levels(levels: Vec<Level>) -> Self {
        Self {
            levels,
            ..Self::default()
        }
    }

    /// Create a filter for specific emitters.
    #[must_use]
    pub fn emitters(emitters: Vec<String>) -> Self {
        Self {
            emitters,
            ..Self::default()
        }
    }

    /// Create a filter for exact event names, e.g. `"global:warn"`.
    #[must_use]
    pub fn names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Restrict to a scope.
    #[must_use]
    pub fn in_scope(mut self, scope: Scope) -> Self {
        self.scopes.push(scope);
        self
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &MessageEvent) -> bool {
        let scope_match = self.scopes.is_empty() || self.scopes.contains(&event.scope);
        let emitter_match =
            self.emitters.is_empty() || self.emitters.iter().any(|e| e == event.emitter());
        let level_match = self.levels.is_empty() || self.levels.contains(&event.level());
        let name_match = self.names.is_empty() || {
            let name = event.name.to_string();
            self.names.iter().any(|n| *n == name)
        };

        scope_match && emitter_match && level_match && name_match
    }
}
