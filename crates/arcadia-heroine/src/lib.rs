//! The playable heroine for the Arcadia workspace.
//!
//! This crate is where the two independent pieces meet: the heroine's
//! behavior is an [`arcadia_fsm::StateMachine`], and whatever she does is
//! announced on an [`arcadia_events::EventBus`] that the host passes in.
//! The [`AchievementTracker`] is a bus listener that never sees the
//! heroine directly.
//!
//! # Modules
//!
//! - [`achievements`] -- [`Achievement`] and the [`AchievementTracker`] listener
//! - [`avatar`] -- [`Avatar`], the entity data her states act upon
//! - [`error`] -- [`HeroineError`]
//! - [`heroine`] -- The [`Heroine`] entity and its [`StepOutcome`]
//! - [`states`] -- [`HeroineState`] and [`StateId`]
//! - [`tuning`] -- [`HeroineTuning`] movement and ability parameters

pub mod achievements;
pub mod avatar;
pub mod error;
pub mod heroine;
pub mod states;
pub mod tuning;

pub use achievements::{Achievement, AchievementTracker};
pub use avatar::{Avatar, Pose};
pub use error::HeroineError;
pub use heroine::{Heroine, StepOutcome};
pub use states::{HeroineState, StateId};
pub use tuning::HeroineTuning;
