//! The tick loop: one heroine, one bus, and the listeners that watch her.
//!
//! Each tick first applies the scheduled actions in order, then advances
//! the heroine's active state. Listener failures are logged and counted
//! but never stop the run.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use arcadia_events::EventBus;
use arcadia_heroine::{Achievement, AchievementTracker, Heroine, StateId, StepOutcome};
use arcadia_types::{EntityId, EventKind, GameEvent, Tick};
use tracing::{info, warn};

use crate::config::ArcadiaConfig;
use crate::error::EngineError;
use crate::journal::Journal;
use crate::schedule::{Action, Schedule};

/// What a finished run looked like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// The heroine's entity reference.
    pub entity: EntityId,
    /// Ticks simulated.
    pub ticks: u64,
    /// State the heroine ended in.
    pub final_state: StateId,
    /// Transitions her state machine performed.
    pub transitions: u64,
    /// Achievements in unlock order.
    pub achievements: Vec<Achievement>,
    /// Events published, per kind.
    pub events: BTreeMap<EventKind, u64>,
    /// Listener failures across the whole run.
    pub listener_failures: usize,
}

/// Run one heroine through the configured schedule.
///
/// # Errors
///
/// Returns [`EngineError::Heroine`] if her state machine rejects a
/// request.
pub fn run(config: &ArcadiaConfig) -> Result<RunSummary, EngineError> {
    let schedule = Schedule::from_config(&config.run);
    if schedule.is_empty() {
        warn!(mode = ?config.run.mode, "Schedule is empty, the heroine will only stand");
    }
    info!(ticks = config.run.ticks, actions = schedule.len(), "Schedule ready");
    run_schedule(config, &schedule)
}

/// Run one heroine through an explicit schedule.
///
/// # Errors
///
/// Returns [`EngineError::Heroine`] if her state machine rejects a
/// request.
pub fn run_schedule(config: &ArcadiaConfig, schedule: &Schedule) -> Result<RunSummary, EngineError> {
    let mut bus: EventBus<GameEvent> = EventBus::new();
    let mut heroine = Heroine::new(config.heroine.tuning())?;

    let tracker = Rc::new(RefCell::new(AchievementTracker::new(heroine.entity())));
    let journal = Rc::new(RefCell::new(Journal::default()));
    bus.subscribe(Rc::clone(&tracker));
    bus.subscribe(Rc::clone(&journal));

    let ticks = std::iter::successors(Some(Tick::first(config.run.tick_ms)), |tick| tick.next())
        .take_while(|tick| tick.number < config.run.ticks);

    let mut listener_failures = 0_usize;
    for tick in ticks {
        for action in schedule.at(tick.number) {
            let outcome = match *action {
                Action::Input(input) => heroine.handle_input(input, &mut bus)?,
                Action::EnterRegion(region) => heroine.enter_region(region, &mut bus),
                Action::Fall => heroine.fall(&mut bus),
            };
            listener_failures = listener_failures.saturating_add(report(tick, &outcome));
        }
        let outcome = heroine.update(tick, &mut bus)?;
        listener_failures = listener_failures.saturating_add(report(tick, &outcome));
    }

    let achievements = tracker.borrow().timeline().to_vec();
    let events = journal.borrow().counts().clone();
    Ok(RunSummary {
        entity: heroine.entity(),
        ticks: config.run.ticks,
        final_state: heroine.state(),
        transitions: heroine.machine().transitions(),
        achievements,
        events,
        listener_failures,
    })
}

/// Log what a step did and return how many listeners failed.
fn report(tick: Tick, outcome: &StepOutcome) -> usize {
    if let Some(transition) = outcome.transition {
        info!(
            tick = tick.number,
            from = %transition.from,
            to = %transition.to,
            kind = ?transition.kind,
            "Heroine changed state"
        );
    }
    for failure in &outcome.failures {
        warn!(
            tick = tick.number,
            listener = %failure.listener,
            error = %failure.error,
            "Listener failed"
        );
    }
    outcome.failures.len()
}
