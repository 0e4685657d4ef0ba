//! # Herald Telemetry
//!
//! Log output for Herald processes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use herald_telemetry::{init_tracing, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_tracing(&config).expect("Failed to init tracing");
//!
//!     // Dispatch and settlement logs are now collected
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `herald` | Service name in the startup log |
//! | `HERALD_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `HERALD_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `HERALD_JSON_LOGS` | `false` (`true` in containers) | JSON formatted logs |

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{env_filter, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("Invalid log filter {directive:?}: {reason}")]
    Filter { directive: String, reason: String },

    #[error("Global subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

/// Convenience macro for a span scoped to one message.
///
/// # Example
///
/// ```rust,ignore
/// use herald_telemetry::message_span;
///
/// let _span = message_span!("present", future.id(), event = %name).entered();
/// ```
#[macro_export]
macro_rules! message_span {
    ($name:expr, $id:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name, message_id = %$id $(, $($field)*)?)
    };
}
