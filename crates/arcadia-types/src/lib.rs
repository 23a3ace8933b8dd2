//! Shared type definitions for the Arcadia workspace.
//!
//! Entity references, game events, input signals and tick contexts live
//! here so that the event bus and the state machine crates can both use
//! them without depending on each other.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entity identifiers
//! - [`enums`] -- Event kinds, input signals, abilities and regions
//! - [`events`] -- The [`GameEvent`] payloads broadcast on the bus
//! - [`tick`] -- The [`Tick`] context passed to per-tick updates

pub mod enums;
pub mod events;
pub mod ids;
pub mod tick;

// Re-export all public types at crate root for convenience.
pub use enums::{Ability, EventKind, Input, Region};
pub use events::GameEvent;
pub use ids::EntityId;
pub use tick::Tick;
