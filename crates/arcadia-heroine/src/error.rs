//! Error types for the arcadia-heroine crate.

use arcadia_fsm::FsmError;

/// Errors raised while driving a heroine.
#[derive(Debug, thiserror::Error)]
pub enum HeroineError {
    /// The state machine refused a request.
    #[error("state machine error: {source}")]
    Fsm {
        /// The underlying state machine error.
        #[from]
        source: FsmError,
    },
}
