//! Achievement tracking as a bus listener.
//!
//! The tracker knows nothing about physics or state machines. It watches
//! the event stream for one hero and unlocks achievements when the right
//! combination of events shows up.

use std::collections::BTreeSet;

use arcadia_events::{Listener, ListenerError, Subscriptions};
use arcadia_types::{Ability, EntityId, GameEvent, Region};
use serde::Serialize;
use tracing::info;

use crate::states::StateId;

/// An achievement the player can unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    /// Fell while standing on the bridge.
    FellOffBridge,
    /// Dived for the first time.
    FirstDive,
    /// Fired a fully charged super bomb.
    SuperBomber,
    /// Landed a dive.
    GroundPounder,
}

/// Listener that unlocks achievements for a single hero.
#[derive(Debug)]
pub struct AchievementTracker {
    hero: EntityId,
    on_bridge: bool,
    unlocked: BTreeSet<Achievement>,
    /// Unlock order, for reporting.
    timeline: Vec<Achievement>,
}

impl AchievementTracker {
    /// Track achievements for `hero`.
    pub const fn new(hero: EntityId) -> Self {
        Self {
            hero,
            on_bridge: false,
            unlocked: BTreeSet::new(),
            timeline: Vec::new(),
        }
    }

    /// Whether `achievement` has been unlocked.
    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.unlocked.contains(&achievement)
    }

    /// Achievements in the order they were unlocked.
    pub fn timeline(&self) -> &[Achievement] {
        &self.timeline
    }

    fn unlock(&mut self, achievement: Achievement) {
        if self.unlocked.insert(achievement) {
            self.timeline.push(achievement);
            info!(hero = %self.hero, ?achievement, "Achievement unlocked");
        }
    }
}

impl Listener<GameEvent> for AchievementTracker {
    fn name(&self) -> &str {
        "achievements"
    }

    fn on_event(
        &mut self,
        event: &GameEvent,
        _subscriptions: &mut Subscriptions<'_, GameEvent>,
    ) -> Result<(), ListenerError> {
        if event.entity() != self.hero {
            return Ok(());
        }
        match event {
            GameEvent::EnteredRegion { region, .. } => {
                self.on_bridge = *region == Region::Bridge;
            }
            GameEvent::EntityFell { .. } if self.on_bridge => {
                self.unlock(Achievement::FellOffBridge);
            }
            GameEvent::StateChanged { to, .. } if to == StateId::Diving.as_str() => {
                self.unlock(Achievement::FirstDive);
            }
            GameEvent::AbilityUsed { ability, .. } => match ability {
                Ability::SuperBomb => self.unlock(Achievement::SuperBomber),
                Ability::GroundPound => self.unlock(Achievement::GroundPounder),
            },
            _ => {}
        }
        Ok(())
    }
}
