//! # Timer Port
//!
//! Schedule-once timers used for timeouts and stay-active windows.

use std::fmt;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::warn;

/// A callback run once when its delay elapses.
pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

/// Schedule-once timer service.
pub trait Timer: Send + Sync + fmt::Debug {
    /// Run `task` once after `delay`.
    ///
    /// Returns `false` if the task could not be scheduled; the task is
    /// dropped without running in that case.
    fn schedule(&self, delay: Duration, task: TimerTask) -> bool;
}

/// Timer backed by the tokio runtime.
///
/// Uses the runtime of the calling task when there is one, otherwise the
/// runtime that was current when the timer was created.
#[derive(Debug, Clone)]
pub struct TokioTimer {
    fallback: Option<Handle>,
}

impl TokioTimer {
    /// Create a timer, capturing the current runtime (if any) as fallback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fallback: Handle::try_current().ok(),
        }
    }

    /// Create a timer bound to an explicit runtime.
    #[must_use]
    pub fn with_handle(handle: Handle) -> Self {
        Self {
            fallback: Some(handle),
        }
    }
}

impl Default for TokioTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer for TokioTimer {
    fn schedule(&self, delay: Duration, task: TimerTask) -> bool {
        let Some(handle) = Handle::try_current().ok().or_else(|| self.fallback.clone()) else {
            warn!(delay_ms = delay.as_millis() as u64, "No tokio runtime, timer dropped");
            return false;
        };

        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        true
    }
}
