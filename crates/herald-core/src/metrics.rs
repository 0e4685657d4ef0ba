//! # Dispatch Metrics
//!
//! Prometheus metrics for message dispatch.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! herald-core = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `herald_messages_dispatched_total` - Counter of dispatched messages (by level)
//! - `herald_messages_unheard_total` - Counter of messages published with no subscriber
//! - `herald_messages_timed_out_total` - Counter of futures settled by their timeout
//! - `herald_errors_trapped_total` - Counter of host errors routed into messages

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total messages dispatched, labeled by level
    pub static ref MESSAGES_DISPATCHED: IntCounterVec = register_int_counter_vec!(
        "herald_messages_dispatched_total",
        "Total number of messages dispatched",
        &["level"]
    )
    .expect("Failed to create MESSAGES_DISPATCHED metric");

    /// Messages nobody was listening for
    pub static ref MESSAGES_UNHEARD: IntCounter = register_int_counter!(
        "herald_messages_unheard_total",
        "Total number of messages published with no subscriber"
    )
    .expect("Failed to create MESSAGES_UNHEARD metric");

    /// Futures settled by their timeout
    pub static ref MESSAGES_TIMED_OUT: IntCounter = register_int_counter!(
        "herald_messages_timed_out_total",
        "Total number of message futures fulfilled by timeout"
    )
    .expect("Failed to create MESSAGES_TIMED_OUT metric");

    /// Host errors routed into the message system
    pub static ref ERRORS_TRAPPED: IntCounter = register_int_counter!(
        "herald_errors_trapped_total",
        "Total number of host errors converted into error messages"
    )
    .expect("Failed to create ERRORS_TRAPPED metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a dispatched message
#[cfg(feature = "metrics")]
pub fn record_dispatched(level: &str, receivers: usize) {
    MESSAGES_DISPATCHED.with_label_values(&[level]).inc();
    if receivers == 0 {
        MESSAGES_UNHEARD.inc();
    }
}

/// Record a timeout firing on a pending future
#[cfg(feature = "metrics")]
pub fn record_timed_out() {
    MESSAGES_TIMED_OUT.inc();
}

/// Record a trapped host error
#[cfg(feature = "metrics")]
pub fn record_error_trapped() {
    ERRORS_TRAPPED.inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_dispatched(_level: &str, _receivers: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn record_timed_out() {}

#[cfg(not(feature = "metrics"))]
pub fn record_error_trapped() {}
