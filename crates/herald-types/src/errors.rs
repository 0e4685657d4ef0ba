//! # Error Types
//!
//! Defines the terminal error a message future can settle with.

use thiserror::Error;

/// Errors carried by a rejected message future.
///
/// The core never inspects or transforms the rejection reason; it is
/// whatever the presentation layer passed to `reject`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageError {
    /// The presentation layer rejected the message.
    #[error("Message rejected: {reason}")]
    Rejected { reason: String },

    /// The settlement channel closed before the future settled.
    #[error("Message future closed before settlement")]
    Closed,
}

impl MessageError {
    /// Build a rejection with the given reason.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
}
