//! # Dialog Replies
//!
//! Typed views over the future of a confirm or prompt dialog. The message
//! is already dispatched when these are created; awaiting only interprets
//! the container the presentation layer settled with.

use herald_types::{DialogContainer, MessageError, MessageFuture};
use std::future::{Future, IntoFuture};
use std::pin::Pin;

/// Action chosen in a settled dialog: the `is` attribute of its first button.
pub fn chosen_action(container: Option<&DialogContainer>) -> Option<&str> {
    container?.get_element("button")?.get_attr("is")
}

/// `true` iff the user picked "yes". No payload (timeout) counts as "no".
pub fn confirmed(container: Option<&DialogContainer>) -> bool {
    chosen_action(container) == Some("yes")
}

/// Input value iff the user picked "ok".
pub fn prompt_value(container: Option<&DialogContainer>) -> Option<String> {
    if chosen_action(container) != Some("ok") {
        return None;
    }
    container?
        .get_element("input")?
        .get_value()
        .map(str::to_string)
}

/// Pending answer to a confirm dialog.
#[derive(Debug, Clone)]
pub struct Confirmation {
    message: MessageFuture,
}

impl Confirmation {
    pub(crate) fn new(message: MessageFuture) -> Self {
        Self { message }
    }

    /// The underlying message future.
    pub fn message(&self) -> &MessageFuture {
        &self.message
    }

    /// Wait for the user's answer.
    pub async fn answer(&self) -> Result<bool, MessageError> {
        let payload = self.message.settled().await?;
        Ok(confirmed(payload.as_ref()))
    }
}

impl IntoFuture for Confirmation {
    type Output = Result<bool, MessageError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.answer().await })
    }
}

/// Pending answer to a prompt dialog.
#[derive(Debug, Clone)]
pub struct PromptReply {
    message: MessageFuture,
}

impl PromptReply {
    pub(crate) fn new(message: MessageFuture) -> Self {
        Self { message }
    }

    pub fn message(&self) -> &MessageFuture {
        &self.message
    }

    /// Wait for the entered value. `None` when cancelled or timed out.
    pub async fn value(&self) -> Result<Option<String>, MessageError> {
        let payload = self.message.settled().await?;
        Ok(prompt_value(payload.as_ref()))
    }
}

impl IntoFuture for PromptReply {
    type Output = Result<Option<String>, MessageError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.value().await })
    }
}
