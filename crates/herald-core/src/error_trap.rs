//! # Error Trap
//!
//! Routes uncaught host errors into error-level messages while the
//! messenger's `catch_errors` toggle is on.
//!
//! The host reports errors through `HostHooks`; an `ErrorTrap` registered
//! there (or installed as the panic hook) decides whether the error was
//! handled. `false` means the host should surface it the default way.

use crate::metrics;
use crate::service::Messenger;
use herald_types::{Level, MessageOptions};
use parking_lot::RwLock;
use std::fmt;
use std::panic::PanicHookInfo;
use std::sync::Arc;
use tracing::{debug, warn};

/// An uncaught runtime error reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostError {
    pub message: String,
    /// Where the error happened, e.g. a file name.
    pub source: Option<String>,
    pub line: Option<u32>,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
            line: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Describe a panic.
    pub fn from_panic(info: &PanicHookInfo<'_>) -> Self {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic".to_string());

        let mut error = Self::new(message);
        if let Some(location) = info.location() {
            error = error.with_source(location.file()).with_line(location.line());
        }
        error
    }

    /// Header shown on the error message.
    pub fn header(&self) -> String {
        match self.line {
            Some(line) => format!("Runtime error (line {line})"),
            None => "Runtime error".to_string(),
        }
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        match (&self.source, self.line) {
            (Some(source), Some(line)) => write!(f, " ({source}:{line})"),
            (Some(source), None) => write!(f, " ({source})"),
            (None, Some(line)) => write!(f, " (line {line})"),
            (None, None) => Ok(()),
        }
    }
}

/// Receives host errors.
pub trait GlobalErrorHandler: Send + Sync {
    /// Returns `true` when the error was handled.
    fn on_error(&self, error: &HostError) -> bool;
}

/// The host's global error hook.
#[derive(Default)]
pub struct HostHooks {
    handler: RwLock<Option<Arc<dyn GlobalErrorHandler>>>,
}

impl HostHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the global handler, replacing any previous one.
    pub fn set_global_error_handler(&self, handler: Arc<dyn GlobalErrorHandler>) {
        if self.handler.write().replace(handler).is_some() {
            debug!("Global error handler replaced");
        }
    }

    pub fn clear_global_error_handler(&self) {
        self.handler.write().take();
    }

    pub fn has_handler(&self) -> bool {
        self.handler.read().is_some()
    }

    /// Hand an error to the registered handler.
    ///
    /// Returns `false` when no handler is registered or it declined.
    pub fn report(&self, error: &HostError) -> bool {
        let handler = self.handler.read().clone();
        match handler {
            Some(handler) => handler.on_error(error),
            None => false,
        }
    }
}

impl fmt::Debug for HostHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostHooks")
            .field("has_handler", &self.has_handler())
            .finish()
    }
}

/// Turns host errors into error-level messages.
#[derive(Debug, Clone)]
pub struct ErrorTrap {
    messenger: Arc<Messenger>,
}

impl ErrorTrap {
    pub fn new(messenger: Arc<Messenger>) -> Self {
        Self { messenger }
    }

    pub fn messenger(&self) -> &Arc<Messenger> {
        &self.messenger
    }

    /// Dispatch `error` as an error message if the messenger is catching.
    ///
    /// Returns whether the error was handled.
    pub fn handle(&self, error: &HostError) -> bool {
        if !self.messenger.is_catching_errors() {
            return false;
        }

        let mut options = MessageOptions::new()
            .level(Level::Error.code())
            .header(error.header())
            .icon(self.messenger.config().error_icon.clone());
        if let Some(source) = &error.source {
            options = options.footer(source.clone());
        }

        let future = self.messenger.message(error.message.clone(), options);
        metrics::record_error_trapped();
        warn!(id = %future.id(), error = %error, "Host error trapped");
        true
    }

    /// Register this trap as the host's global error handler.
    pub fn install(self: &Arc<Self>, hooks: &HostHooks) {
        hooks.set_global_error_handler(self.clone());
    }

    /// Route panics through the trap. When not catching, the previously
    /// installed panic hook runs instead.
    pub fn install_panic_hook(self: &Arc<Self>) {
        let trap = self.clone();
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if !trap.handle(&HostError::from_panic(info)) {
                previous(info);
            }
        }));
    }
}

impl GlobalErrorHandler for ErrorTrap {
    fn on_error(&self, error: &HostError) -> bool {
        self.handle(error)
    }
}
