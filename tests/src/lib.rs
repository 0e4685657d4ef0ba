//! # Herald Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── support.rs        # Scripted presentation layer, tracing setup
//! │
//! └── integration/      # End-to-end flows over the bus
//!     ├── dialog_flows.rs
//!     ├── timing_flows.rs
//!     └── error_trap_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p herald-tests
//!
//! # By category
//! cargo test -p herald-tests integration::timing_flows::
//!
//! # Benchmarks
//! cargo bench -p herald-tests
//! ```

#![allow(unused_variables)]
#![allow(dead_code)]

pub mod integration;
