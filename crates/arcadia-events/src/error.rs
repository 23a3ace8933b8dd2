//! Error types for the arcadia-events crate.
//!
//! A broken listener must never take the broadcaster down with it, so the
//! bus itself has no fallible operations. These errors describe why a
//! single listener failed and are collected into a
//! [`PublishReport`](crate::PublishReport).

/// Why a single listener failed to handle an event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListenerError {
    /// The listener returned an error from its callback.
    #[error("listener rejected event: {reason}")]
    Rejected {
        /// Description supplied by the listener.
        reason: String,
    },

    /// The listener panicked while handling the event.
    #[error("listener panicked: {message}")]
    Panicked {
        /// The panic payload, if it was a string.
        message: String,
    },

    /// The listener was already mutably borrowed by someone else.
    #[error("listener is borrowed elsewhere and cannot receive events")]
    Busy,
}

impl ListenerError {
    /// Shorthand for [`ListenerError::Rejected`].
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
}
