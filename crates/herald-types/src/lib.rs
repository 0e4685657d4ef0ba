//! # Herald Types Crate
//!
//! This crate contains the types shared between callers, the dispatch
//! engine and presentation layers.
//!
//! ## Design Principles
//!
//! - **Total Inputs**: Options bags are coerced, never rejected. A malformed
//!   field degrades to its default instead of raising an error.
//! - **Single Settlement**: A `MessageFuture` leaves `Pending` exactly once;
//!   later settlement attempts are ignored.
//! - **Shared Handle**: The future is a cheap clonable handle. The caller and
//!   the presentation layer both hold it; nobody owns it.

pub mod dialog;
pub mod errors;
pub mod future;
pub mod level;
pub mod options;
pub mod timer;

pub use dialog::{DialogContainer, DialogElement};
pub use errors::*;
pub use future::{FutureState, MessageFuture, SettleOutcome};
pub use level::Level;
pub use options::{MessageMetadata, MessageOptions, PromptOptions, DEFAULT_EMITTER};
pub use timer::{Timer, TimerTask, TokioTimer};
