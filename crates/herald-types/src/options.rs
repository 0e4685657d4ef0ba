//! # Options Bags
//!
//! `MessageOptions` is what a caller hands to `message`; `MessageMetadata`
//! is the resolved snapshot carried by the future once dispatched.
//!
//! Options can be built with the typed setters or coerced from a loose JSON
//! object. Coercion is total: fields with the wrong type fall back to their
//! defaults and unknown keys land in the `extra` bag.

use crate::level::Level;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::time::Duration;

/// Emitter name used when the caller does not supply one.
pub const DEFAULT_EMITTER: &str = "global";

/// Caller-supplied options for a single message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageOptions {
    /// Logical source of the message. Becomes the event name prefix.
    pub emitter: Option<String>,
    /// Raw level code (1..=4). Unknown codes resolve to `Level::Message`.
    pub level: Option<i64>,
    /// Icon name; when present the body is decorated with an icon block.
    pub icon: Option<String>,
    /// Header hint for the presentation layer.
    pub header: Option<String>,
    /// Footer hint for the presentation layer.
    pub footer: Option<String>,
    /// Force-fulfil the future with no payload after this period.
    pub timeout: Option<Duration>,
    /// Hold off settlement for this period.
    pub stay_active: Option<Duration>,
    /// Alternate bus scope. `None` publishes on the global scope.
    pub target: Option<String>,
    /// Extension fields, carried verbatim onto the future.
    pub extra: Map<String, Value>,
}

impl MessageOptions {
    /// Create an empty options bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn emitter(mut self, emitter: impl Into<String>) -> Self {
        self.emitter = Some(emitter.into());
        self
    }

    #[must_use]
    pub fn level(mut self, code: i64) -> Self {
        self.level = Some(code);
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    #[must_use]
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn stay_active(mut self, window: Duration) -> Self {
        self.stay_active = Some(window);
        self
    }

    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Add an extension field.
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Coerce a loose JSON value into an options bag.
    ///
    /// Never fails. A non-object yields the empty bag.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };
        Self::from_map(map)
    }

    fn from_map(map: Map<String, Value>) -> Self {
        let mut options = Self::default();

        for (key, value) in map {
            match key.as_str() {
                "emitter" => options.emitter = coerce_text(&value),
                "level" => options.level = coerce_code(&value),
                "icon" => options.icon = coerce_text(&value),
                "header" => options.header = coerce_text(&value),
                "footer" => options.footer = coerce_text(&value),
                "timeout" => options.timeout = coerce_millis(&value),
                "stayActive" | "stay_active" => options.stay_active = coerce_millis(&value),
                "target" => options.target = coerce_text(&value),
                _ => {
                    options.extra.insert(key, value);
                }
            }
        }

        options
    }
}

impl<'de> Deserialize<'de> for MessageOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Options for a prompt dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptOptions {
    /// Options forwarded to the underlying message.
    pub message: MessageOptions,
    /// Initial value of the input field.
    pub default_value: Option<String>,
    /// Label rendered before the input field.
    pub label: Option<String>,
    /// Placeholder of the input field.
    pub placeholder: Option<String>,
}

impl PromptOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn with_message(mut self, options: MessageOptions) -> Self {
        self.message = options;
        self
    }

    /// Coerce a loose JSON value. Prompt keys are pulled out; everything
    /// else is handed to `MessageOptions::from_value`.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };

        let default_value = map.remove("defaultValue").as_ref().and_then(coerce_text);
        let label = map.remove("label").and_then(|v| match v {
            // an empty label still renders the element
            Value::String(s) => Some(s),
            _ => None,
        });
        let placeholder = map.remove("placeholder").as_ref().and_then(coerce_text);

        Self {
            message: MessageOptions::from_map(map),
            default_value,
            label,
            placeholder,
        }
    }
}

impl<'de> Deserialize<'de> for PromptOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Resolved request metadata, attached to a dispatched future.
///
/// Required fields are typed; caller extensions stay in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageMetadata {
    pub emitter: String,
    pub level: Level,
    pub icon: Option<String>,
    pub header: Option<String>,
    pub footer: Option<String>,
    #[serde(serialize_with = "serialize_millis")]
    pub timeout: Option<Duration>,
    #[serde(serialize_with = "serialize_millis")]
    pub stay_active: Option<Duration>,
    pub target: Option<String>,
    pub extra: Map<String, Value>,
}

impl Default for MessageMetadata {
    fn default() -> Self {
        Self {
            emitter: DEFAULT_EMITTER.to_string(),
            level: Level::default(),
            icon: None,
            header: None,
            footer: None,
            timeout: None,
            stay_active: None,
            target: None,
            extra: Map::new(),
        }
    }
}

impl MessageMetadata {
    /// `<emitter>:<level>`
    #[must_use]
    pub fn event_name(&self) -> String {
        format!("{}:{}", self.emitter, self.level.name())
    }
}

fn serialize_millis<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(d) => serializer.serialize_some(&u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
        None => serializer.serialize_none(),
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn coerce_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_millis(value: &Value) -> Option<Duration> {
    let Value::Number(n) = value else {
        return None;
    };
    let millis = n.as_f64()?;
    if millis <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(millis / 1000.0).ok()
}
