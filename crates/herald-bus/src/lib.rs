//! # Herald Bus - Event Bus for Message Dispatch
//!
//! Carries dispatched message futures to whatever presentation layer is
//! listening.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐                    ┌────────────────────┐
//! │  Dispatcher  │                    │ Presentation layer │
//! │              │    publish()       │                    │
//! │              │ ──────┐            │  fulfill/reject    │
//! └──────────────┘       │            └────────────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐           │
//!                  │  Event Bus   │           │
//!                  │              │ ──────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! ## Event Names
//!
//! Every event is named `<emitter>:<level>` (e.g. `global:warn`) and
//! published on a scope: the global scope unless the caller picked a target.
//! The payload is the message future itself.
//!
//! ## Lagging
//!
//! Each subscriber buffers at most the bus capacity. A subscriber that falls
//! further behind skips the oldest events, and the futures they carried are
//! never presented. Skips are logged at `warn` and counted per subscription.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod metrics;
pub mod presenter;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventName, MessageEvent, Scope};
pub use presenter::{spawn_presenter, PresentationHandler};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
