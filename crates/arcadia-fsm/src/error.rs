//! Error types for the arcadia-fsm crate.
//!
//! State identifiers are generic, so errors carry their `Display` form.
//! Every error leaves the machine exactly as it was before the call, and
//! no enter or exit hook runs.

/// Errors raised while building or driving a [`StateMachine`](crate::StateMachine).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FsmError {
    /// Two states in the table share an identifier.
    #[error("duplicate state: {state}")]
    DuplicateState {
        /// The repeated identifier.
        state: String,
    },

    /// The initial state is not in the table.
    #[error("initial state {state} is not registered")]
    UnknownInitial {
        /// The missing identifier.
        state: String,
    },

    /// The active state asked for a state that is not in the table.
    #[error("state {from} requested a transition to unknown state {to}")]
    UnknownState {
        /// The state that made the request.
        from: String,
        /// The unknown target.
        to: String,
    },

    /// The active state asked to pop back but nothing was suspended.
    #[error("state {from} requested a pop with an empty history")]
    EmptyHistory {
        /// The state that made the request.
        from: String,
    },

    /// The active identifier has no state in the table.
    ///
    /// Construction rules this out; seeing it means the machine's own
    /// invariant was broken.
    #[error("active state {state} is missing from the state table")]
    MissingActiveState {
        /// The dangling identifier.
        state: String,
    },
}
