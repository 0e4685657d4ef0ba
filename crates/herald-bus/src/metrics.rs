//! # Bus Metrics
//!
//! Prometheus metrics for delivery losses on the bus.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! herald-bus = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `herald_messages_lagged_total` - Counter of events a subscriber skipped after falling behind

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, IntCounter};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Events overwritten before a lagging subscriber could read them
    pub static ref MESSAGES_LAGGED: IntCounter = register_int_counter!(
        "herald_messages_lagged_total",
        "Total number of message events skipped by lagging subscribers"
    )
    .expect("Failed to create MESSAGES_LAGGED metric");
}

/// Record events skipped by a lagging subscriber
#[cfg(feature = "metrics")]
pub fn record_lagged(count: u64) {
    MESSAGES_LAGGED.inc_by(count);
}

#[cfg(not(feature = "metrics"))]
pub fn record_lagged(_count: u64) {}
