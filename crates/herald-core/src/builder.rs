//! # Request Builder
//!
//! Turns a raw message and an options bag into a canonical request: the
//! resolved metadata plus the body markup.
//!
//! Building never fails. Missing or malformed inputs degrade to defaults.
//!
//! Only the choice of template matters here; rendering is the presentation
//! layer's job.

use herald_types::{Level, MessageMetadata, MessageOptions, PromptOptions};
use serde_json::Value;
use std::time::Duration;

/// Footer with a single primary "Ok" action.
pub const ALERT_FOOTER: &str = r#"<button class="pure-button pure-button-primary">Ok</button>"#;

/// Footer with "No"/"Yes" actions.
pub const CONFIRM_FOOTER: &str = r#"<button is="no" class="pure-button">No</button><button is="yes" class="pure-button pure-button-primary">Yes</button>"#;

/// Footer with "Cancel"/"Ok" actions.
pub const PROMPT_FOOTER: &str = r#"<button is="cancel" class="pure-button">Cancel</button><button is="ok" class="pure-button pure-button-primary">Ok</button>"#;

/// Id of the prompt's input element.
pub const PROMPT_INPUT_ID: &str = "iprompt";

/// A canonical request, ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRequest {
    pub metadata: MessageMetadata,
    pub body: String,
}

impl MessageRequest {
    /// `<emitter>:<level>`
    pub fn event_name(&self) -> String {
        self.metadata.event_name()
    }
}

/// Builds requests for the base message and the dialog variants.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    default_emitter: String,
}

impl RequestBuilder {
    pub fn new(default_emitter: impl Into<String>) -> Self {
        Self {
            default_emitter: default_emitter.into(),
        }
    }

    /// Base builder.
    pub fn build(&self, message: impl Into<String>, options: MessageOptions) -> MessageRequest {
        let MessageOptions {
            emitter,
            level,
            icon,
            header,
            footer,
            timeout,
            stay_active,
            target,
            extra,
        } = options;

        let icon = non_empty(icon);
        let mut body = message.into();
        if let Some(icon) = &icon {
            body = decorate_with_icon(icon, &body);
        }

        MessageRequest {
            metadata: MessageMetadata {
                emitter: non_empty(emitter).unwrap_or_else(|| self.default_emitter.clone()),
                level: Level::resolve(level),
                icon,
                header,
                footer,
                timeout: non_zero(timeout),
                stay_active: non_zero(stay_active),
                target: non_empty(target),
                extra,
            },
            body,
        }
    }

    /// Base builder over loose JSON inputs.
    ///
    /// A string message is used as is, `null`/`false` become the empty
    /// string, anything else is rendered as JSON text.
    pub fn build_from_value(&self, message: &Value, options: Value) -> MessageRequest {
        self.build(body_from_value(message), MessageOptions::from_value(options))
    }

    /// Message with a single "Ok" action.
    pub fn alert(&self, message: impl Into<String>, icon: Option<String>) -> MessageRequest {
        let options = MessageOptions {
            footer: Some(ALERT_FOOTER.to_string()),
            icon,
            ..MessageOptions::default()
        };
        self.build(message, options)
    }

    /// Alert forced to warning level with the given icon.
    pub fn warn(&self, message: impl Into<String>, icon: &str) -> MessageRequest {
        let options = MessageOptions::new()
            .footer(ALERT_FOOTER)
            .icon(icon)
            .level(Level::Warning.code());
        self.build(message, options)
    }

    /// Message with "No"/"Yes" actions.
    pub fn confirm(&self, message: impl Into<String>, icon: Option<String>) -> MessageRequest {
        let options = MessageOptions {
            footer: Some(CONFIRM_FOOTER.to_string()),
            icon,
            ..MessageOptions::default()
        };
        self.build(message, options)
    }

    /// Message with an input field and "Cancel"/"Ok" actions.
    ///
    /// The caller's message options are kept, except the footer which is
    /// always the prompt footer.
    pub fn prompt(&self, message: impl Into<String>, options: PromptOptions) -> MessageRequest {
        let PromptOptions {
            message: mut message_options,
            default_value,
            label,
            placeholder,
        } = options;

        let body = prompt_body(
            &message.into(),
            label.as_deref(),
            placeholder.as_deref(),
            default_value.as_deref(),
        );
        message_options.footer = Some(PROMPT_FOOTER.to_string());
        self.build(body, message_options)
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new(herald_types::DEFAULT_EMITTER)
    }
}

/// Wrap `body` in the icon block + message block.
pub fn decorate_with_icon(icon: &str, body: &str) -> String {
    format!(
        r#"<div class="dialog-message-icon"><i icon="{}"></i></div><div class="dialog-message">{}</div>"#,
        escape_attr(icon),
        body
    )
}

/// Form markup of a prompt.
pub fn prompt_body(
    message: &str,
    label: Option<&str>,
    placeholder: Option<&str>,
    default_value: Option<&str>,
) -> String {
    let mut markup = String::from(r#"<div class="pure-form">"#);

    if !message.is_empty() {
        markup.push_str(r#"<div class="dialog-prompt">"#);
        markup.push_str(message);
        markup.push_str("</div>");
    }

    if let Some(label) = label {
        markup.push_str(&format!(r#"<label for="{PROMPT_INPUT_ID}">{label}</label>"#));
    }

    markup.push_str(&format!(r#"<input id="{PROMPT_INPUT_ID}" type="text""#));
    if let Some(placeholder) = placeholder.filter(|p| !p.is_empty()) {
        markup.push_str(&format!(r#" placeholder="{}""#, escape_attr(placeholder)));
    }
    if let Some(value) = default_value.filter(|v| !v.is_empty()) {
        markup.push_str(&format!(r#" value="{}""#, escape_attr(value)));
    }
    markup.push_str(r#" fm-defaultitem="true" fm-primaryonenter="true"></div>"#);

    markup
}

/// Coerce a loose message payload into body text.
pub fn body_from_value(message: &Value) -> String {
    match message {
        Value::String(s) => s.clone(),
        Value::Null | Value::Bool(false) => String::new(),
        other => other.to_string(),
    }
}

/// Escape text for use inside a double-quoted attribute.
pub fn escape_attr(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn non_zero(value: Option<Duration>) -> Option<Duration> {
    value.filter(|d| !d.is_zero())
}
