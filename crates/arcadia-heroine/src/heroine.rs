//! The playable heroine: her body, her state machine, and the events she
//! announces.
//!
//! The heroine never reaches for a global bus. Every operation that may
//! announce something takes the bus as an explicit `&mut EventBus`.

use arcadia_events::{EventBus, ListenerFailure, PublishReport};
use arcadia_fsm::{StateMachine, Transition};
use arcadia_types::{EntityId, GameEvent, Input, Region, Tick};
use tracing::debug;

use crate::avatar::Avatar;
use crate::error::HeroineError;
use crate::states::{HeroineState, StateId};
use crate::tuning::HeroineTuning;

/// What one heroine operation did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// The transition performed, if any.
    pub transition: Option<Transition<StateId>>,
    /// Events announced on the bus, in publish order.
    pub announced: Vec<GameEvent>,
    /// Listeners that failed while those events were delivered.
    pub failures: Vec<ListenerFailure>,
}

impl StepOutcome {
    fn announce(&mut self, bus: &mut EventBus<GameEvent>, event: GameEvent) {
        let PublishReport { failures, .. } = bus.publish(&event);
        self.failures.extend(failures);
        self.announced.push(event);
    }
}

/// A heroine entity.
#[derive(Debug)]
pub struct Heroine {
    avatar: Avatar,
    machine: StateMachine<HeroineState>,
}

impl Heroine {
    /// Create a standing heroine on solid ground.
    ///
    /// # Errors
    ///
    /// Returns [`HeroineError::Fsm`] if the state table is inconsistent.
    pub fn new(tuning: HeroineTuning) -> Result<Self, HeroineError> {
        let mut avatar = Avatar::new(tuning);
        let mut machine = StateMachine::new(HeroineState::table(), StateId::Standing)?;
        machine.start(&mut avatar)?;
        debug!(entity = %avatar.entity, "Heroine created");
        Ok(Self { avatar, machine })
    }

    /// The heroine's entity reference.
    pub const fn entity(&self) -> EntityId {
        self.avatar.entity
    }

    /// Identifier of the active state.
    pub const fn state(&self) -> StateId {
        self.machine.current()
    }

    /// Read-only view of the body.
    pub const fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    /// Read-only view of the state machine.
    pub const fn machine(&self) -> &StateMachine<HeroineState> {
        &self.machine
    }

    /// Feed one input to the state machine.
    ///
    /// A completed transition is announced as [`GameEvent::StateChanged`],
    /// followed by any abilities the transition unleashed.
    ///
    /// # Errors
    ///
    /// Returns [`HeroineError::Fsm`] if the machine rejected the request;
    /// nothing is announced in that case.
    pub fn handle_input(
        &mut self,
        input: Input,
        bus: &mut EventBus<GameEvent>,
    ) -> Result<StepOutcome, HeroineError> {
        let transition = self.machine.handle_input(&mut self.avatar, input)?;
        let mut outcome = StepOutcome {
            transition,
            ..StepOutcome::default()
        };
        if let Some(transition) = transition {
            outcome.announce(
                bus,
                GameEvent::StateChanged {
                    entity: self.entity(),
                    from: transition.from.as_str().to_owned(),
                    to: transition.to.as_str().to_owned(),
                },
            );
        }
        self.announce_abilities(bus, &mut outcome);
        Ok(outcome)
    }

    /// Advance the active state by one tick.
    ///
    /// # Errors
    ///
    /// Returns [`HeroineError::Fsm`] only if the machine's invariant broke.
    pub fn update(&mut self, tick: Tick, bus: &mut EventBus<GameEvent>) -> Result<StepOutcome, HeroineError> {
        self.machine.update(&mut self.avatar, tick)?;
        let mut outcome = StepOutcome::default();
        self.announce_abilities(bus, &mut outcome);
        Ok(outcome)
    }

    /// Move the heroine into `region` and announce it.
    pub fn enter_region(&mut self, region: Region, bus: &mut EventBus<GameEvent>) -> StepOutcome {
        self.avatar.region = region;
        let mut outcome = StepOutcome::default();
        outcome.announce(
            bus,
            GameEvent::EnteredRegion {
                entity: self.entity(),
                region,
            },
        );
        outcome
    }

    /// Announce that the heroine fell off whatever she stood on.
    pub fn fall(&mut self, bus: &mut EventBus<GameEvent>) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        outcome.announce(
            bus,
            GameEvent::EntityFell {
                entity: self.entity(),
            },
        );
        outcome
    }

    fn announce_abilities(&mut self, bus: &mut EventBus<GameEvent>, outcome: &mut StepOutcome) {
        let entity = self.entity();
        for ability in self.avatar.drain_abilities() {
            outcome.announce(bus, GameEvent::AbilityUsed { entity, ability });
        }
    }
}
