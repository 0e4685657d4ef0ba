//! # Herald Core
//!
//! Notification and dialog broker. A caller asks for a message to be shown
//! and gets back a `MessageFuture`; a presentation layer subscribed to the
//! bus renders it and settles the future.
//!
//! ## Flow
//!
//! ```text
//! Messenger::message ─→ RequestBuilder ─→ Dispatcher ─→ EventPublisher
//!        │                                    │
//!        └──────────── MessageFuture ←────────┘ (timeout / stay-active timers)
//! ```
//!
//! ## Modules
//!
//! - `builder`: options bag + message → metadata and body markup
//! - `dispatch`: future creation, timers, publication
//! - `dialogs`: confirm/prompt reply interpretation
//! - `error_trap`: host errors → error messages
//! - `registry`: first-writer-wins instance registry
//! - `service`: the `Messenger` facade

pub mod builder;
pub mod config;
pub mod dialogs;
pub mod dispatch;
pub mod error_trap;
pub mod metrics;
pub mod registry;
pub mod service;

pub use builder::{MessageRequest, RequestBuilder};
pub use config::{ConfigError, HeraldConfig};
pub use dialogs::{Confirmation, PromptReply};
pub use dispatch::Dispatcher;
pub use error_trap::{ErrorTrap, GlobalErrorHandler, HostError, HostHooks};
pub use registry::Registry;
pub use service::{Messenger, MESSENGER_KEY};

pub use herald_types::{
    DialogContainer, DialogElement, FutureState, Level, MessageError, MessageFuture,
    MessageOptions, PromptOptions, SettleOutcome,
};
