//! The capability set every state provides.

use arcadia_types::Tick;

/// What a state asks the machine to do after handling an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next<Id> {
    /// Replace the active state with `Id`. History is left as it is.
    Switch(Id),
    /// Suspend the active state on the history stack and activate `Id`.
    ///
    /// The stack is unbounded: a state that pushes and then leaves with
    /// [`Switch`](Self::Switch) instead of [`Pop`](Self::Pop) leaves its
    /// entry behind for good.
    Push(Id),
    /// Return to the most recently suspended state.
    Pop,
}

/// One state of an entity's state machine.
///
/// Implementations are usually a closed enum with one variant per state,
/// each variant carrying whatever per-entity data that state accumulates.
/// `Context` is the entity data the hooks are allowed to touch; the machine
/// never holds it, the host passes it in on every call.
pub trait Behavior {
    /// Identifier naming this state.
    type Id: Copy + Ord + core::fmt::Debug + core::fmt::Display;
    /// Input signal type.
    type Input;
    /// Entity data handed to every hook.
    type Context;

    /// This state's identifier. Must not change over the state's lifetime.
    fn id(&self) -> Self::Id;

    /// React to an input. Returning `None` keeps this state active.
    ///
    /// The machine may still refuse the request, so effects that belong to
    /// the transition go in [`on_exit`](Self::on_exit) and
    /// [`on_enter`](Self::on_enter), not here.
    fn handle_input(&mut self, ctx: &mut Self::Context, input: Self::Input) -> Option<Next<Self::Id>>;

    /// Per-tick work. Never causes a transition.
    fn update(&mut self, _ctx: &mut Self::Context, _tick: Tick) {}

    /// Runs when this state becomes active.
    fn on_enter(&mut self, _ctx: &mut Self::Context) {}

    /// Runs when this state stops being active.
    fn on_exit(&mut self, _ctx: &mut Self::Context) {}
}
