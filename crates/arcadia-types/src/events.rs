//! Game events broadcast through the event bus.
//!
//! Events are immutable, transient records. They live only for the duration
//! of a single `publish` call and are never stored by the bus.

use serde::{Deserialize, Serialize};

use crate::enums::{Ability, EventKind, Region};
use crate::ids::EntityId;

/// Something that happened to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// The entity fell off whatever it was standing on.
    EntityFell {
        /// The entity that fell.
        entity: EntityId,
    },

    /// The entity moved into a region.
    EnteredRegion {
        /// The entity that moved.
        entity: EntityId,
        /// The region it is now in.
        region: Region,
    },

    /// The entity's state machine completed a transition.
    StateChanged {
        /// The entity whose machine transitioned.
        entity: EntityId,
        /// Name of the state that was exited.
        from: String,
        /// Name of the state that is now active.
        to: String,
    },

    /// The entity unleashed a special ability.
    AbilityUsed {
        /// The entity that used the ability.
        entity: EntityId,
        /// The ability that was used.
        ability: Ability,
    },
}

impl GameEvent {
    /// The category of this event.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::EntityFell { .. } => EventKind::EntityFell,
            Self::EnteredRegion { .. } => EventKind::EnteredRegion,
            Self::StateChanged { .. } => EventKind::StateChanged,
            Self::AbilityUsed { .. } => EventKind::AbilityUsed,
        }
    }

    /// The entity this event is about.
    pub const fn entity(&self) -> EntityId {
        match self {
            Self::EntityFell { entity }
            | Self::EnteredRegion { entity, .. }
            | Self::StateChanged { entity, .. }
            | Self::AbilityUsed { entity, .. } => *entity,
        }
    }
}
