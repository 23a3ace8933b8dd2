//! The listener capability and the event trait the bus dispatches on.

use arcadia_types::{EventKind, GameEvent};

use crate::bus::Subscriptions;
use crate::error::ListenerError;

/// An event the bus can broadcast.
///
/// The bus only needs to know an event's kind, for filtered
/// subscriptions. Everything else about the payload is between the
/// publisher and its listeners.
pub trait BusEvent {
    /// The category type listeners can filter on.
    type Kind: Copy + Ord + core::fmt::Debug;

    /// The category of this event.
    fn kind(&self) -> Self::Kind;
}

impl BusEvent for GameEvent {
    type Kind = EventKind;

    fn kind(&self) -> EventKind {
        Self::kind(self)
    }
}

/// Something that wants to hear about events.
///
/// Implementations receive each event by reference together with a
/// [`Subscriptions`] view of the bus, through which they may subscribe or
/// unsubscribe listeners (themselves included) mid-broadcast.
pub trait Listener<E: BusEvent> {
    /// Name used in logs and failure reports.
    fn name(&self) -> &str {
        core::any::type_name::<Self>()
    }

    /// Handle one event.
    ///
    /// # Errors
    ///
    /// Returning an error marks this delivery as failed in the
    /// [`PublishReport`](crate::PublishReport). Delivery to the remaining
    /// listeners continues regardless.
    fn on_event(
        &mut self,
        event: &E,
        subscriptions: &mut Subscriptions<'_, E>,
    ) -> Result<(), ListenerError>;
}

/// Adapts a closure into a [`Listener`].
///
/// Handy for tests and one-off hooks that do not deserve a named type.
pub struct FnListener<F> {
    name: String,
    callback: F,
}

impl<F> FnListener<F> {
    /// Wrap `callback` under the given name.
    pub fn new<E>(name: impl Into<String>, callback: F) -> Self
    where
        E: BusEvent,
        F: FnMut(&E, &mut Subscriptions<'_, E>) -> Result<(), ListenerError>,
    {
        Self {
            name: name.into(),
            callback,
        }
    }
}

impl<E, F> Listener<E> for FnListener<F>
where
    E: BusEvent,
    F: FnMut(&E, &mut Subscriptions<'_, E>) -> Result<(), ListenerError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn on_event(
        &mut self,
        event: &E,
        subscriptions: &mut Subscriptions<'_, E>,
    ) -> Result<(), ListenerError> {
        (self.callback)(event, subscriptions)
    }
}
