//! Per-tick action schedules, scripted or generated from a seed.

use std::collections::BTreeMap;

use arcadia_types::{Input, Region};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::config::{RunConfig, RunMode, ScriptStep};

/// Something the host does to the heroine at a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Feed an input to her state machine.
    Input(Input),
    /// Move her into a region.
    EnterRegion(Region),
    /// Make her fall.
    Fall,
}

/// Actions keyed by tick, in the order they are applied within a tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    steps: BTreeMap<u64, Vec<Action>>,
}

impl Schedule {
    /// Build the schedule the run config asks for.
    pub fn from_config(run: &RunConfig) -> Self {
        match run.mode {
            RunMode::Script => Self::from_script(&run.script),
            RunMode::Random => Self::random(run.seed, run.ticks),
        }
    }

    /// Replay scripted steps. Steps sharing a tick keep their file order.
    pub fn from_script(script: &[ScriptStep]) -> Self {
        let mut schedule = Self::default();
        for step in script {
            if let Some(input) = step.input {
                schedule.push(step.tick, Action::Input(input));
            }
            if let Some(region) = step.region {
                schedule.push(step.tick, Action::EnterRegion(region));
            }
            if step.fall {
                schedule.push(step.tick, Action::Fall);
            }
        }
        schedule
    }

    /// Roughly one action every four ticks, reproducible from `seed`.
    pub fn random(seed: u64, ticks: u64) -> Self {
        const INPUTS: [Input; 4] = [Input::PressA, Input::PressDown, Input::ReleaseDown, Input::Land];
        const REGIONS: [Region; 3] = [Region::Ground, Region::Bridge, Region::River];

        let mut rng = StdRng::seed_from_u64(seed);
        let mut schedule = Self::default();
        for tick in 0..ticks {
            let action = match rng.random_range(0..16_u32) {
                0..=2 => INPUTS.choose(&mut rng).copied().map(Action::Input),
                3 => REGIONS.choose(&mut rng).copied().map(Action::EnterRegion),
                4 if rng.random_bool(0.25) => Some(Action::Fall),
                _ => None,
            };
            if let Some(action) = action {
                schedule.push(tick, action);
            }
        }
        schedule
    }

    /// Actions due at `tick`.
    pub fn at(&self, tick: u64) -> &[Action] {
        self.steps.get(&tick).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of scheduled actions.
    pub fn len(&self) -> usize {
        self.steps.values().map(Vec::len).sum()
    }

    /// Whether nothing is scheduled at all.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn push(&mut self, tick: u64, action: Action) {
        self.steps.entry(tick).or_default().push(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_steps_expand_in_order() {
        let script = vec![ScriptStep {
            tick: 3,
            input: Some(Input::PressA),
            region: Some(Region::Bridge),
            fall: true,
        }];
        let schedule = Schedule::from_script(&script);

        assert_eq!(
            schedule.at(3),
            &[
                Action::Input(Input::PressA),
                Action::EnterRegion(Region::Bridge),
                Action::Fall
            ]
        );
        assert!(schedule.at(4).is_empty());
        assert_eq!(schedule.len(), 3);
    }

    #[test]
    fn random_schedule_is_reproducible() {
        let a = Schedule::random(7, 200);
        let b = Schedule::random(7, 200);
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn random_schedule_stays_within_run() {
        let schedule = Schedule::random(3, 50);
        assert!(schedule.steps.keys().all(|tick| *tick < 50));
    }
}
