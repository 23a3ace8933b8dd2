//! The per-entity state machine.
//!
//! A [`StateMachine`] owns one instance of every state its entity can be
//! in, plus the identifier of the single active one. Transitions always
//! run in the same order: exit hook of the old state, swap of the active
//! identifier, enter hook of the new state. All three finish before
//! [`StateMachine::handle_input`] returns.
//!
//! The machine holds plain owned data and is `Send` whenever its states
//! are. It takes `&mut self` for every operation, so sharing one between
//! threads needs an external lock around the whole machine.

use std::collections::BTreeMap;

use arcadia_types::Tick;
use tracing::{debug, warn};

use crate::behavior::{Behavior, Next};
use crate::error::FsmError;

/// How a transition moved between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Plain replacement; history untouched.
    Switch,
    /// The old state was suspended on the history stack.
    Push,
    /// The new state was resumed from the history stack.
    Pop,
}

/// Record of a completed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<Id> {
    /// State that was exited.
    pub from: Id,
    /// State that is now active.
    pub to: Id,
    /// Switch, push or pop.
    pub kind: TransitionKind,
}

/// Exactly-one-active-state machine for a single entity.
#[derive(Debug)]
pub struct StateMachine<B: Behavior> {
    states: BTreeMap<B::Id, B>,
    current: B::Id,
    history: Vec<B::Id>,
    transitions: u64,
    started: bool,
}

impl<B: Behavior> StateMachine<B> {
    /// Build a machine from its full state table.
    ///
    /// No hooks run here; call [`start`](Self::start) to fire the initial
    /// state's enter hook.
    ///
    /// # Errors
    ///
    /// Returns [`FsmError::DuplicateState`] if two states share an id, or
    /// [`FsmError::UnknownInitial`] if `initial` is not among them.
    pub fn new<I>(states: I, initial: B::Id) -> Result<Self, FsmError>
    where
        I: IntoIterator<Item = B>,
    {
        let mut table = BTreeMap::new();
        for state in states {
            let id = state.id();
            if table.insert(id, state).is_some() {
                return Err(FsmError::DuplicateState {
                    state: id.to_string(),
                });
            }
        }
        if !table.contains_key(&initial) {
            return Err(FsmError::UnknownInitial {
                state: initial.to_string(),
            });
        }
        Ok(Self {
            states: table,
            current: initial,
            history: Vec::new(),
            transitions: 0,
            started: false,
        })
    }

    /// Run the initial state's enter hook.
    ///
    /// Only the first call has an effect; returns whether the hook ran.
    pub fn start(&mut self, ctx: &mut B::Context) -> Result<bool, FsmError> {
        if self.started {
            return Ok(false);
        }
        self.active_mut()?.on_enter(ctx);
        self.started = true;
        Ok(true)
    }

    /// Identifier of the active state.
    pub const fn current(&self) -> B::Id {
        self.current
    }

    /// The active state.
    pub fn active(&self) -> Result<&B, FsmError> {
        self.states
            .get(&self.current)
            .ok_or_else(|| FsmError::MissingActiveState {
                state: self.current.to_string(),
            })
    }

    /// Look up any state in the table, active or not.
    pub fn state(&self, id: B::Id) -> Option<&B> {
        self.states.get(&id)
    }

    /// Identifiers of every state, in identifier order.
    pub fn state_ids(&self) -> impl Iterator<Item = B::Id> + '_ {
        self.states.keys().copied()
    }

    /// Suspended states, oldest first.
    ///
    /// Grows by one per [`Next::Push`] and shrinks only on [`Next::Pop`].
    pub fn history(&self) -> &[B::Id] {
        &self.history
    }

    /// Number of transitions completed so far.
    pub const fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Hand `input` to the active state and carry out whatever it asks for.
    ///
    /// Returns `Ok(None)` when the state keeps itself active (no hooks
    /// run), or the completed [`Transition`].
    ///
    /// # Errors
    ///
    /// [`FsmError::UnknownState`] or [`FsmError::EmptyHistory`] when the
    /// request cannot be honored. The machine is left untouched and no
    /// hooks run.
    pub fn handle_input(
        &mut self,
        ctx: &mut B::Context,
        input: B::Input,
    ) -> Result<Option<Transition<B::Id>>, FsmError> {
        let Some(next) = self.active_mut()?.handle_input(ctx, input) else {
            return Ok(None);
        };
        self.apply(ctx, next).map(Some)
    }

    /// Run the active state's per-tick hook.
    pub fn update(&mut self, ctx: &mut B::Context, tick: Tick) -> Result<(), FsmError> {
        self.active_mut()?.update(ctx, tick);
        Ok(())
    }

    fn apply(&mut self, ctx: &mut B::Context, next: Next<B::Id>) -> Result<Transition<B::Id>, FsmError> {
        let from = self.current;
        let (to, kind) = match next {
            Next::Switch(id) => (id, TransitionKind::Switch),
            Next::Push(id) => (id, TransitionKind::Push),
            Next::Pop => {
                let Some(&resumed) = self.history.last() else {
                    warn!(%from, "Pop requested with empty history");
                    return Err(FsmError::EmptyHistory {
                        from: from.to_string(),
                    });
                };
                (resumed, TransitionKind::Pop)
            }
        };

        if !self.states.contains_key(&to) {
            warn!(%from, %to, "Transition to unknown state rejected");
            return Err(FsmError::UnknownState {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        self.active_mut()?.on_exit(ctx);
        match kind {
            TransitionKind::Switch => {}
            TransitionKind::Push => self.history.push(from),
            TransitionKind::Pop => {
                self.history.pop();
            }
        }
        self.current = to;
        self.active_mut()?.on_enter(ctx);
        self.transitions = self.transitions.saturating_add(1);

        debug!(%from, %to, ?kind, "State transition");
        Ok(Transition { from, to, kind })
    }

    fn active_mut(&mut self) -> Result<&mut B, FsmError> {
        let current = self.current;
        self.states
            .get_mut(&current)
            .ok_or_else(|| FsmError::MissingActiveState {
                state: current.to_string(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// A state driven by a fixed rule table, logging every hook call.
    struct Scripted {
        id: &'static str,
        rules: Vec<(char, Next<&'static str>)>,
        ticks: u32,
    }

    impl Scripted {
        fn new(id: &'static str, rules: &[(char, Next<&'static str>)]) -> Self {
            Self {
                id,
                rules: rules.to_vec(),
                ticks: 0,
            }
        }
    }

    impl Behavior for Scripted {
        type Id = &'static str;
        type Input = char;
        type Context = Vec<String>;

        fn id(&self) -> &'static str {
            self.id
        }

        fn handle_input(&mut self, ctx: &mut Vec<String>, input: char) -> Option<Next<&'static str>> {
            ctx.push(format!("input:{}:{input}", self.id));
            self.rules
                .iter()
                .find(|(key, _)| *key == input)
                .map(|(_, next)| *next)
        }

        fn update(&mut self, ctx: &mut Vec<String>, _tick: Tick) {
            self.ticks += 1;
            ctx.push(format!("update:{}", self.id));
        }

        fn on_enter(&mut self, ctx: &mut Vec<String>) {
            ctx.push(format!("enter:{}", self.id));
        }

        fn on_exit(&mut self, ctx: &mut Vec<String>) {
            ctx.push(format!("exit:{}", self.id));
        }
    }

    fn machine() -> StateMachine<Scripted> {
        StateMachine::new(
            [
                Scripted::new("idle", &[('g', Next::Switch("run")), ('x', Next::Switch("ghost"))]),
                Scripted::new("run", &[('s', Next::Switch("idle")), ('m', Next::Push("menu"))]),
                Scripted::new("menu", &[('b', Next::Pop), ('q', Next::Switch("idle"))]),
            ],
            "idle",
        )
        .unwrap()
    }

    #[test]
    fn rejects_unknown_initial_state() {
        let result = StateMachine::new([Scripted::new("idle", &[])], "nowhere");
        assert_eq!(
            result.err(),
            Some(FsmError::UnknownInitial {
                state: "nowhere".to_owned()
            })
        );
    }

    #[test]
    fn rejects_duplicate_states() {
        let result = StateMachine::new([Scripted::new("idle", &[]), Scripted::new("idle", &[])], "idle");
        assert!(matches!(result, Err(FsmError::DuplicateState { .. })));
    }

    #[test]
    fn construction_runs_no_hooks_and_start_runs_once() {
        let mut fsm = machine();
        let mut log = Vec::new();
        assert!(fsm.start(&mut log).unwrap());
        assert!(!fsm.start(&mut log).unwrap());
        assert_eq!(log, vec!["enter:idle"]);
    }

    #[test]
    fn transition_runs_exit_then_enter() {
        let mut fsm = machine();
        let mut log = Vec::new();

        let transition = fsm.handle_input(&mut log, 'g').unwrap();

        assert_eq!(
            transition,
            Some(Transition {
                from: "idle",
                to: "run",
                kind: TransitionKind::Switch
            })
        );
        assert_eq!(log, vec!["input:idle:g", "exit:idle", "enter:run"]);
        assert_eq!(fsm.current(), "run");
        assert_eq!(fsm.transitions(), 1);
    }

    #[test]
    fn input_without_rule_is_a_guarded_noop() {
        let mut fsm = machine();
        let mut log = Vec::new();

        let transition = fsm.handle_input(&mut log, 'z').unwrap();

        assert_eq!(transition, None);
        assert_eq!(log, vec!["input:idle:z"]);
        assert_eq!(fsm.current(), "idle");
        assert_eq!(fsm.transitions(), 0);
    }

    #[test]
    fn unknown_target_is_rejected_without_hooks() {
        let mut fsm = machine();
        let mut log = Vec::new();

        let result = fsm.handle_input(&mut log, 'x');

        assert_eq!(
            result,
            Err(FsmError::UnknownState {
                from: "idle".to_owned(),
                to: "ghost".to_owned()
            })
        );
        assert_eq!(log, vec!["input:idle:x"]);
        assert_eq!(fsm.current(), "idle");
        assert!(fsm.active().is_ok());
    }

    #[test]
    fn update_never_transitions() {
        let mut fsm = machine();
        let mut log = Vec::new();

        for number in 0..3 {
            fsm.update(&mut log, Tick { number, delta_ms: 16 }).unwrap();
        }

        assert_eq!(fsm.current(), "idle");
        assert_eq!(fsm.state("idle").map(|s| s.ticks), Some(3));
        assert_eq!(fsm.state("run").map(|s| s.ticks), Some(0));
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn push_and_pop_restore_suspended_state() {
        let mut fsm = machine();
        let mut log = Vec::new();
        fsm.handle_input(&mut log, 'g').unwrap();
        log.clear();

        let pushed = fsm.handle_input(&mut log, 'm').unwrap();
        assert_eq!(pushed.map(|t| t.kind), Some(TransitionKind::Push));
        assert_eq!(fsm.history(), &["run"]);

        let popped = fsm.handle_input(&mut log, 'b').unwrap();
        assert_eq!(
            popped,
            Some(Transition {
                from: "menu",
                to: "run",
                kind: TransitionKind::Pop
            })
        );
        assert!(fsm.history().is_empty());
        assert_eq!(
            log,
            vec![
                "input:run:m",
                "exit:run",
                "enter:menu",
                "input:menu:b",
                "exit:menu",
                "enter:run"
            ]
        );
    }

    #[test]
    fn switch_from_pushed_state_keeps_history() {
        let mut fsm = machine();
        let mut log = Vec::new();
        fsm.handle_input(&mut log, 'g').unwrap();
        fsm.handle_input(&mut log, 'm').unwrap();
        fsm.handle_input(&mut log, 'q').unwrap();

        assert_eq!(fsm.current(), "idle");
        assert_eq!(fsm.history(), &["run"]);
    }

    #[test]
    fn push_switch_cycles_accumulate_history() {
        let mut fsm = machine();
        let mut log = Vec::new();
        fsm.handle_input(&mut log, 'g').unwrap();
        for _ in 0..3 {
            fsm.handle_input(&mut log, 'm').unwrap();
            fsm.handle_input(&mut log, 'q').unwrap();
            fsm.handle_input(&mut log, 'g').unwrap();
        }

        assert_eq!(fsm.current(), "run");
        assert_eq!(fsm.history(), &["run", "run", "run"]);
    }

    #[test]
    fn pop_with_empty_history_is_rejected() {
        let mut fsm = StateMachine::new([Scripted::new("menu", &[('b', Next::Pop)])], "menu").unwrap();
        let mut log = Vec::new();

        let result = fsm.handle_input(&mut log, 'b');

        assert_eq!(
            result,
            Err(FsmError::EmptyHistory {
                from: "menu".to_owned()
            })
        );
        assert_eq!(fsm.current(), "menu");
        assert_eq!(log, vec!["input:menu:b"]);
    }

    #[test]
    fn exactly_one_active_state_after_any_sequence() {
        let mut fsm = machine();
        let mut log = Vec::new();
        for input in "gxmbzsqgmmbbbxq".chars() {
            let _ = fsm.handle_input(&mut log, input);
            assert!(fsm.active().is_ok());
            assert!(fsm.state_ids().any(|id| id == fsm.current()));
        }
    }
}
