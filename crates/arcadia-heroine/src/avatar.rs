//! The heroine's body: the entity data her state hooks act upon.

use arcadia_types::{Ability, EntityId, Region};
use serde::Serialize;

use crate::tuning::HeroineTuning;

/// Which sprite the heroine is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pose {
    /// Upright.
    Stand,
    /// Crouched, charging.
    Duck,
    /// In the air.
    Jump,
    /// Plunging downwards.
    Dive,
}

/// Entity data owned by the heroine and mutated by her states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Avatar {
    /// Reference handed out in events.
    pub entity: EntityId,
    /// Current sprite.
    pub pose: Pose,
    /// Vertical velocity; positive is up.
    pub vertical_velocity: i32,
    /// Region the heroine is standing in.
    pub region: Region,
    /// Abilities unleashed since the host last drained them.
    #[serde(skip)]
    pending_abilities: Vec<Ability>,
    #[serde(skip)]
    tuning: HeroineTuning,
}

impl Avatar {
    /// A standing heroine on solid ground.
    pub fn new(tuning: HeroineTuning) -> Self {
        Self {
            entity: EntityId::new(),
            pose: Pose::Stand,
            vertical_velocity: 0,
            region: Region::Ground,
            pending_abilities: Vec::new(),
            tuning,
        }
    }

    /// The tuning this avatar was built with.
    pub const fn tuning(&self) -> &HeroineTuning {
        &self.tuning
    }

    /// Queue an ability for the host to announce.
    pub fn unleash(&mut self, ability: Ability) {
        self.pending_abilities.push(ability);
    }

    /// Take every ability queued since the last call.
    pub fn drain_abilities(&mut self) -> Vec<Ability> {
        std::mem::take(&mut self.pending_abilities)
    }

    /// Apply one tick of gravity.
    pub const fn fall_step(&mut self) {
        self.vertical_velocity = self.vertical_velocity.saturating_sub(self.tuning.gravity);
    }
}
