//! Per-entity finite state machines for the Arcadia workspace.
//!
//! Each entity owns one [`StateMachine`]. The machine holds exactly one
//! active state at all times, forwards inputs and ticks to it, and lets the
//! state decide when to move on. The machine itself never decides a
//! transition.
//!
//! # Modules
//!
//! - [`behavior`] -- The [`Behavior`] trait states implement and the
//!   [`Next`] requests they return
//! - [`error`] -- [`FsmError`]
//! - [`machine`] -- [`StateMachine`] and the [`Transition`] records it
//!   produces

pub mod behavior;
pub mod error;
pub mod machine;

pub use behavior::{Behavior, Next};
pub use error::FsmError;
pub use machine::{StateMachine, Transition, TransitionKind};
