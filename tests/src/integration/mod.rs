//! # Integration Flows
//!
//! A `Messenger` dispatching onto an in-memory bus with a scripted
//! presentation layer on the other side.

pub mod dialog_flows;
pub mod error_trap_flows;
pub mod timing_flows;
