//! # Deferred Dispatch Engine
//!
//! Turns a built request into a pending `MessageFuture`, arms its timers and
//! publishes it on the bus.
//!
//! ## Ordering
//!
//! ```text
//! request → future (metadata + content) → stay-active → timeout → publish
//! ```
//!
//! Listeners only ever see a fully populated future. `dispatch` never blocks
//! and never fails.

use crate::builder::MessageRequest;
use crate::metrics;
use herald_bus::{EventPublisher, MessageEvent};
use herald_types::{MessageFuture, SettleOutcome, Timer};
use std::sync::Arc;
use tracing::{debug, warn};

/// Publishes requests as managed futures.
#[derive(Clone)]
pub struct Dispatcher {
    publisher: Arc<dyn EventPublisher>,
    timer: Arc<dyn Timer>,
}

impl Dispatcher {
    pub fn new(publisher: Arc<dyn EventPublisher>, timer: Arc<dyn Timer>) -> Self {
        Self { publisher, timer }
    }

    /// Dispatch a request. Returns the future immediately.
    ///
    /// With no subscriber and no timeout the future stays pending forever.
    pub fn dispatch(&self, request: MessageRequest) -> MessageFuture {
        let MessageRequest { metadata, body } = request;
        let stay_active = metadata.stay_active;
        let timeout = metadata.timeout;

        let future = MessageFuture::new(metadata, body, self.timer.clone());

        if let Some(window) = stay_active {
            future.stay_active(window);
        }

        if let Some(timeout) = timeout {
            self.arm_timeout(&future, timeout);
        }

        let event = MessageEvent::for_future(future.clone());
        let name = event.name.to_string();
        let scope = event.scope.to_string();
        let receivers = self.publisher.publish(event);

        metrics::record_dispatched(future.level().name(), receivers);
        if receivers == 0 && timeout.is_none() {
            warn!(id = %future.id(), event = %name, scope = %scope, "No presenter listening, message will never settle");
        } else if receivers == 0 {
            debug!(id = %future.id(), event = %name, scope = %scope, "No presenter listening for message");
        } else {
            debug!(id = %future.id(), event = %name, scope = %scope, receivers, "Message dispatched");
        }

        future
    }

    fn arm_timeout(&self, future: &MessageFuture, timeout: std::time::Duration) {
        let pending = future.clone();
        let scheduled = self.timer.schedule(
            timeout,
            Box::new(move || match pending.fulfill_empty() {
                SettleOutcome::Settled | SettleOutcome::Deferred => {
                    debug!(id = %pending.id(), "Message timed out");
                    metrics::record_timed_out();
                }
                SettleOutcome::Ignored => {}
            }),
        );

        if !scheduled {
            debug!(id = %future.id(), "Timeout not armed; message stays pending until settled");
        }
    }

    pub fn events_published(&self) -> u64 {
        self.publisher.events_published()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("timer", &self.timer)
            .field("events_published", &self.publisher.events_published())
            .finish()
    }
}
