//! The heroine's four states and their transition rules.
//!
//! | State    | Input          | Next     |
//! |----------|----------------|----------|
//! | Standing | `PressA`       | Jumping  |
//! | Standing | `PressDown`    | Ducking  |
//! | Ducking  | `ReleaseDown`  | Standing |
//! | Jumping  | `PressDown`    | Diving   |
//! | Jumping  | `Land`         | Standing |
//! | Diving   | `Land`         | Standing |
//!
//! Anything not in the table leaves the state unchanged. `handle_input`
//! only decides; every effect lives in a hook, so a refused transition
//! leaves the avatar untouched:
//!
//! - entering Jumping sets the upward velocity, entering Diving the
//!   downward one
//! - leaving Diving is the landing, and unleashes the ground pound
//! - a Ducking tick charges, firing the super bomb once past the max
//! - Jumping and Diving ticks apply gravity

use arcadia_fsm::{Behavior, Next};
use arcadia_types::{Ability, Input, Tick};
use serde::Serialize;
use tracing::info;

use crate::avatar::{Avatar, Pose};

/// Identifier of a heroine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateId {
    /// On the ground, upright.
    Standing,
    /// On the ground, crouched.
    Ducking,
    /// In the air after a jump.
    Jumping,
    /// Plunging after pressing down mid-jump.
    Diving,
}

impl StateId {
    /// Every state, in table order.
    pub const ALL: [Self; 4] = [Self::Standing, Self::Ducking, Self::Jumping, Self::Diving];

    /// Lower-case name used in events and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standing => "standing",
            Self::Ducking => "ducking",
            Self::Jumping => "jumping",
            Self::Diving => "diving",
        }
    }
}

impl core::fmt::Display for StateId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One heroine state together with the data only it accumulates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeroineState {
    /// Upright and idle.
    Standing,
    /// Crouched; `charge` counts ticks spent ducking this time.
    Ducking {
        /// Ticks since the heroine started ducking.
        charge: u32,
    },
    /// Airborne.
    Jumping,
    /// Diving towards the ground.
    Diving,
}

impl HeroineState {
    /// A fresh instance of every state, one per identifier.
    pub fn table() -> [Self; 4] {
        [
            Self::Standing,
            Self::Ducking { charge: 0 },
            Self::Jumping,
            Self::Diving,
        ]
    }
}

impl Behavior for HeroineState {
    type Id = StateId;
    type Input = Input;
    type Context = Avatar;

    fn id(&self) -> StateId {
        match self {
            Self::Standing => StateId::Standing,
            Self::Ducking { .. } => StateId::Ducking,
            Self::Jumping => StateId::Jumping,
            Self::Diving => StateId::Diving,
        }
    }

    fn handle_input(&mut self, _avatar: &mut Avatar, input: Input) -> Option<Next<StateId>> {
        let next = match (self, input) {
            (Self::Standing, Input::PressA) => StateId::Jumping,
            (Self::Standing, Input::PressDown) => StateId::Ducking,
            (Self::Ducking { .. }, Input::ReleaseDown)
            | (Self::Jumping | Self::Diving, Input::Land) => StateId::Standing,
            (Self::Jumping, Input::PressDown) => StateId::Diving,
            _ => return None,
        };
        Some(Next::Switch(next))
    }

    fn update(&mut self, avatar: &mut Avatar, tick: Tick) {
        match self {
            Self::Ducking { charge } => {
                *charge = charge.saturating_add(1);
                if *charge == avatar.tuning().max_charge.saturating_add(1) {
                    info!(entity = %avatar.entity, tick = tick.number, "Super bomb charged");
                    avatar.unleash(Ability::SuperBomb);
                }
            }
            Self::Jumping | Self::Diving => avatar.fall_step(),
            Self::Standing => {}
        }
    }

    fn on_enter(&mut self, avatar: &mut Avatar) {
        match self {
            Self::Standing => {
                avatar.pose = Pose::Stand;
                avatar.vertical_velocity = 0;
            }
            Self::Ducking { charge } => {
                *charge = 0;
                avatar.pose = Pose::Duck;
            }
            Self::Jumping => {
                avatar.pose = Pose::Jump;
                avatar.vertical_velocity = avatar.tuning().jump_velocity;
            }
            Self::Diving => {
                avatar.pose = Pose::Dive;
                avatar.vertical_velocity = avatar.tuning().dive_velocity;
            }
        }
    }

    fn on_exit(&mut self, avatar: &mut Avatar) {
        if *self == Self::Diving {
            avatar.unleash(Ability::GroundPound);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::HeroineTuning;

    fn tick(number: u64) -> Tick {
        Tick {
            number,
            delta_ms: 16,
        }
    }

    #[test]
    fn table_has_one_instance_per_id() {
        let ids: Vec<StateId> = HeroineState::table().iter().map(Behavior::id).collect();
        assert_eq!(ids, StateId::ALL.to_vec());
    }

    #[test]
    fn deciding_a_jump_touches_nothing() {
        let mut avatar = Avatar::new(HeroineTuning::default());
        let before = avatar.clone();
        let mut state = HeroineState::Standing;
        let next = state.handle_input(&mut avatar, Input::PressA);
        assert_eq!(next, Some(Next::Switch(StateId::Jumping)));
        assert_eq!(avatar, before);
    }

    #[test]
    fn entering_jumping_sets_jump_velocity() {
        let mut avatar = Avatar::new(HeroineTuning::default());
        let mut state = HeroineState::Jumping;
        state.on_enter(&mut avatar);
        assert_eq!(avatar.vertical_velocity, 12);
        assert_eq!(avatar.pose, Pose::Jump);
    }

    #[test]
    fn leaving_diving_unleashes_ground_pound() {
        let mut avatar = Avatar::new(HeroineTuning::default());
        let mut state = HeroineState::Diving;
        assert_eq!(state.handle_input(&mut avatar, Input::Land), Some(Next::Switch(StateId::Standing)));
        assert!(avatar.drain_abilities().is_empty());

        state.on_exit(&mut avatar);
        assert_eq!(avatar.drain_abilities(), vec![Ability::GroundPound]);
    }

    #[test]
    fn unmatched_inputs_are_ignored() {
        let mut avatar = Avatar::new(HeroineTuning::default());
        let mut diving = HeroineState::Diving;
        assert_eq!(diving.handle_input(&mut avatar, Input::PressA), None);
        assert_eq!(diving.handle_input(&mut avatar, Input::PressDown), None);
        let mut standing = HeroineState::Standing;
        assert_eq!(standing.handle_input(&mut avatar, Input::Land), None);
    }

    #[test]
    fn ducking_fires_super_bomb_once_past_max_charge() {
        let tuning = HeroineTuning {
            max_charge: 3,
            ..HeroineTuning::default()
        };
        let mut avatar = Avatar::new(tuning);
        let mut state = HeroineState::Ducking { charge: 0 };

        for number in 0..3 {
            state.update(&mut avatar, tick(number));
        }
        assert!(avatar.drain_abilities().is_empty());

        state.update(&mut avatar, tick(3));
        assert_eq!(avatar.drain_abilities(), vec![Ability::SuperBomb]);

        for number in 4..10 {
            state.update(&mut avatar, tick(number));
        }
        assert!(avatar.drain_abilities().is_empty());
    }

    #[test]
    fn entering_ducking_resets_charge() {
        let mut avatar = Avatar::new(HeroineTuning::default());
        let mut state = HeroineState::Ducking { charge: 17 };
        state.on_enter(&mut avatar);
        assert_eq!(state, HeroineState::Ducking { charge: 0 });
        assert_eq!(avatar.pose, Pose::Duck);
    }

    #[test]
    fn airborne_states_apply_gravity() {
        let mut avatar = Avatar::new(HeroineTuning::default());
        avatar.vertical_velocity = 5;
        let mut state = HeroineState::Jumping;
        state.update(&mut avatar, tick(0));
        assert_eq!(avatar.vertical_velocity, 4);
    }

    #[test]
    fn state_names_are_lowercase() {
        assert_eq!(StateId::Diving.to_string(), "diving");
    }

    #[test]
    fn serialized_ids_match_display_names() {
        for id in StateId::ALL {
            let json = serde_json::to_string(&id).ok();
            assert_eq!(json, Some(format!("\"{id}\"")));
        }
    }
}
