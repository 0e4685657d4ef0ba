//! # Managed Promise
//!
//! `MessageFuture` is the deferred result of a dispatched message. It is a
//! promise and a metadata bag at once: the presentation layer reads the
//! metadata and `content` off it, renders, and eventually settles it.
//!
//! ## State Machine
//!
//! ```text
//! PENDING ──fulfill (no guard)──→ FULFILLED   (terminal)
//! PENDING ──reject  (no guard)──→ REJECTED    (terminal)
//! PENDING ──settle  (guard on)──→ PENDING + queued attempt
//!                                     │
//!                          guard expires: queued attempt applied
//! ```
//!
//! Settling a terminal future is ignored, never an error.

use crate::dialog::DialogContainer;
use crate::errors::MessageError;
use crate::options::MessageMetadata;
use crate::timer::{Timer, TokioTimer};
use crate::level::Level;
use parking_lot::Mutex;
use serde_json::Value;
use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

/// State of a message future.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FutureState {
    /// Not settled yet.
    Pending,
    /// Settled by the user or a timeout. `None` means no payload (timeout).
    Fulfilled(Option<DialogContainer>),
    /// Rejected by the presentation layer.
    Rejected(MessageError),
}

impl FutureState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fulfilled(_) => "fulfilled",
            Self::Rejected(_) => "rejected",
        }
    }

    fn into_result(self) -> Result<Option<DialogContainer>, MessageError> {
        match self {
            Self::Fulfilled(payload) => Ok(payload),
            Self::Rejected(err) => Err(err),
            Self::Pending => Err(MessageError::Closed),
        }
    }
}

/// What happened to a settlement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// The future moved to a terminal state.
    Settled,
    /// A stay-active guard is up; the attempt is queued until it expires.
    Deferred,
    /// The future was already terminal, or another attempt is queued.
    Ignored,
}

/// Stay-active guard.
#[derive(Debug, Default)]
struct Guard {
    /// Bumped on every arm so a stale release is a no-op.
    generation: u64,
    active: bool,
    /// First attempt made while the guard was up.
    queued: Option<FutureState>,
}

struct Inner {
    id: Uuid,
    metadata: MessageMetadata,
    content: String,
    created_at: Instant,
    state: watch::Sender<FutureState>,
    guard: Mutex<Guard>,
    timer: Arc<dyn Timer>,
}

/// A managed promise plus the metadata of the message it belongs to.
///
/// Cloning is cheap; every clone refers to the same settlement.
#[derive(Clone)]
pub struct MessageFuture {
    inner: Arc<Inner>,
}

impl MessageFuture {
    /// Create a pending future.
    ///
    /// `content` is the final rendered body and cannot change afterwards.
    pub fn new(metadata: MessageMetadata, content: impl Into<String>, timer: Arc<dyn Timer>) -> Self {
        let (state, _) = watch::channel(FutureState::Pending);
        Self {
            inner: Arc::new(Inner {
                id: Uuid::new_v4(),
                metadata,
                content: content.into(),
                created_at: Instant::now(),
                state,
                guard: Mutex::new(Guard::default()),
                timer,
            }),
        }
    }

    /// Create a pending future with default metadata on the tokio timer.
    pub fn pending(content: impl Into<String>) -> Self {
        Self::new(MessageMetadata::default(), content, Arc::new(TokioTimer::new()))
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn metadata(&self) -> &MessageMetadata {
        &self.inner.metadata
    }

    pub fn content(&self) -> &str {
        &self.inner.content
    }

    pub fn emitter(&self) -> &str {
        &self.inner.metadata.emitter
    }

    pub fn level(&self) -> Level {
        self.inner.metadata.level
    }

    /// Extension field merged in from the caller's options.
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.inner.metadata.extra.get(key)
    }

    /// Time since creation.
    pub fn elapsed(&self) -> Duration {
        self.inner.created_at.elapsed()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FutureState {
        self.inner.state.borrow().clone()
    }

    pub fn is_pending(&self) -> bool {
        self.inner.state.borrow().is_pending()
    }

    pub fn is_fulfilled(&self) -> bool {
        matches!(*self.inner.state.borrow(), FutureState::Fulfilled(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(*self.inner.state.borrow(), FutureState::Rejected(_))
    }

    /// Non-blocking peek at the settled result. `None` while pending.
    pub fn outcome(&self) -> Option<Result<Option<DialogContainer>, MessageError>> {
        let state = self.state();
        state.is_terminal().then(|| state.into_result())
    }

    /// Whether a stay-active guard is currently up.
    pub fn is_guarded(&self) -> bool {
        self.inner.guard.lock().active
    }

    /// Fulfil with the container the user interacted with.
    pub fn fulfill(&self, payload: DialogContainer) -> SettleOutcome {
        self.settle(FutureState::Fulfilled(Some(payload)))
    }

    /// Fulfil without payload.
    pub fn fulfill_empty(&self) -> SettleOutcome {
        self.settle(FutureState::Fulfilled(None))
    }

    /// Reject with a reason.
    pub fn reject(&self, reason: impl Into<String>) -> SettleOutcome {
        self.settle(FutureState::Rejected(MessageError::rejected(reason)))
    }

    /// Hold off settlement for `window`.
    ///
    /// Attempts made while the guard is up are queued (first one wins) and
    /// applied when it expires. Re-arming replaces the previous window.
    pub fn stay_active(&self, window: Duration) {
        if window.is_zero() || !self.is_pending() {
            return;
        }

        let generation = {
            let mut guard = self.inner.guard.lock();
            guard.generation += 1;
            guard.active = true;
            guard.generation
        };

        let future = self.clone();
        let scheduled = self.inner.timer.schedule(
            window,
            Box::new(move || future.release_guard(generation)),
        );

        if !scheduled {
            // nothing would ever lift the guard
            self.release_guard(generation);
        } else {
            debug!(id = %self.id(), window_ms = window.as_millis() as u64, "Stay-active guard armed");
        }
    }

    /// Wait for settlement.
    pub async fn settled(&self) -> Result<Option<DialogContainer>, MessageError> {
        let mut rx = self.inner.state.subscribe();
        let state = rx
            .wait_for(FutureState::is_terminal)
            .await
            .map(|state| state.clone())
            .map_err(|_| MessageError::Closed)?;
        state.into_result()
    }

    fn settle(&self, next: FutureState) -> SettleOutcome {
        let mut guard = self.inner.guard.lock();

        if guard.active && self.is_pending() {
            if guard.queued.is_some() {
                return SettleOutcome::Ignored;
            }
            debug!(id = %self.id(), attempt = next.label(), "Settlement deferred by stay-active guard");
            guard.queued = Some(next);
            return SettleOutcome::Deferred;
        }

        self.apply(next)
    }

    fn release_guard(&self, generation: u64) {
        let mut guard = self.inner.guard.lock();
        if guard.generation != generation {
            return;
        }
        guard.active = false;

        if let Some(queued) = guard.queued.take() {
            self.apply(queued);
        }
    }

    /// Caller holds the guard lock.
    fn apply(&self, next: FutureState) -> SettleOutcome {
        let label = next.label();
        let applied = self.inner.state.send_if_modified(|state| {
            if state.is_pending() {
                *state = next;
                true
            } else {
                false
            }
        });

        if applied {
            debug!(
                id = %self.id(),
                state = label,
                elapsed_ms = self.elapsed().as_millis() as u64,
                "Message future settled"
            );
            SettleOutcome::Settled
        } else {
            SettleOutcome::Ignored
        }
    }
}

impl fmt::Debug for MessageFuture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageFuture")
            .field("id", &self.inner.id)
            .field("event", &self.inner.metadata.event_name())
            .field("state", &self.state().label())
            .finish()
    }
}

impl IntoFuture for MessageFuture {
    type Output = Result<Option<DialogContainer>, MessageError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.settled().await })
    }
}
