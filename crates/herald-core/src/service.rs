//! # Messenger
//!
//! The entry point callers use: builds requests, dispatches them and wraps
//! dialog replies. Also owns the error-catching toggle read by the error
//! trap.

use crate::builder::{MessageRequest, RequestBuilder};
use crate::config::HeraldConfig;
use crate::dialogs::{Confirmation, PromptReply};
use crate::dispatch::Dispatcher;
use crate::registry::Registry;
use herald_bus::{EventPublisher, InMemoryEventBus};
use herald_types::{MessageFuture, MessageOptions, PromptOptions, Timer, TokioTimer};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Registry key of the process-wide messenger.
pub const MESSENGER_KEY: &str = "herald.messenger";

/// Message broker facade.
#[derive(Debug)]
pub struct Messenger {
    config: HeraldConfig,
    builder: RequestBuilder,
    dispatcher: Dispatcher,
    catch_errors: AtomicBool,
}

impl Messenger {
    /// Invalid config fields fall back to their defaults with a warning.
    pub fn new(config: HeraldConfig, publisher: Arc<dyn EventPublisher>, timer: Arc<dyn Timer>) -> Self {
        let config = config.sanitized();
        Self {
            builder: RequestBuilder::new(config.default_emitter.clone()),
            dispatcher: Dispatcher::new(publisher, timer),
            catch_errors: AtomicBool::new(config.catch_errors),
            config,
        }
    }

    /// Messenger over a fresh in-memory bus and the tokio timer.
    pub fn in_memory(config: HeraldConfig) -> (Self, Arc<InMemoryEventBus>) {
        let config = config.sanitized();
        let bus = Arc::new(InMemoryEventBus::with_capacity(config.channel_capacity));
        let messenger = Self::new(config, bus.clone(), Arc::new(TokioTimer::new()));
        (messenger, bus)
    }

    /// The process-wide messenger held by `registry`, created by `init` on
    /// first use.
    pub fn shared<F>(registry: &Registry, init: F) -> Arc<Self>
    where
        F: FnOnce() -> Self,
    {
        registry.get_or_init(MESSENGER_KEY, init)
    }

    pub fn config(&self) -> &HeraldConfig {
        &self.config
    }

    pub fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Dispatch an already built request.
    pub fn dispatch(&self, request: MessageRequest) -> MessageFuture {
        self.dispatcher.dispatch(request)
    }

    /// Show a message.
    pub fn message(&self, message: impl Into<String>, options: MessageOptions) -> MessageFuture {
        self.dispatch(self.builder.build(message, options))
    }

    /// Show a message from loose JSON inputs.
    pub fn message_value(&self, message: &Value, options: Value) -> MessageFuture {
        self.dispatch(self.builder.build_from_value(message, options))
    }

    /// Message with an "Ok" action.
    pub fn alert(&self, message: impl Into<String>, icon: Option<String>) -> MessageFuture {
        self.dispatch(self.builder.alert(message, icon))
    }

    /// Warning-level alert with the configured warning icon.
    pub fn warn(&self, message: impl Into<String>) -> MessageFuture {
        self.dispatch(self.builder.warn(message, &self.config.warn_icon))
    }

    /// Ask a yes/no question.
    pub fn confirm(&self, message: impl Into<String>, icon: Option<String>) -> Confirmation {
        Confirmation::new(self.dispatch(self.builder.confirm(message, icon)))
    }

    /// Ask for a line of text.
    pub fn prompt(&self, message: impl Into<String>, options: PromptOptions) -> PromptReply {
        PromptReply::new(self.dispatch(self.builder.prompt(message, options)))
    }

    /// Turn trapping of host errors on or off.
    pub fn catch_errors(&self, on: bool) {
        let was = self.catch_errors.swap(on, Ordering::SeqCst);
        if was != on {
            info!(catch_errors = on, "Host error trapping toggled");
        }
    }

    pub fn is_catching_errors(&self) -> bool {
        self.catch_errors.load(Ordering::SeqCst)
    }

    pub fn events_published(&self) -> u64 {
        self.dispatcher.events_published()
    }
}
