//! The event bus: registration arena, snapshot dispatch and failure
//! isolation.
//!
//! # Registration
//!
//! Listeners live in an arena of slots. A [`ListenerHandle`] names a slot
//! plus the generation the slot had when the listener was registered.
//! Removing a listener bumps the slot's generation, so an old handle can
//! never reach whatever listener reuses the slot later. A slot whose
//! generation would overflow is retired instead of reused. Delivery order is
//! kept separately, keyed by a monotonically increasing registration
//! sequence number.
//!
//! # Dispatch
//!
//! [`EventBus::publish`] snapshots the matching listeners before invoking
//! any of them. Listeners may subscribe or unsubscribe (themselves or
//! others) through the [`Subscriptions`] view they are handed; such
//! changes apply to the next broadcast, never to the one in progress.
//!
//! # Threading
//!
//! Listeners are shared as `Rc<RefCell<_>>`, which makes the bus `!Send`
//! and `!Sync`. A bus belongs to exactly one thread; hosts that need one
//! per worker create one per worker.

use std::any::Any;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::ListenerError;
use crate::listener::{BusEvent, Listener};
use crate::report::PublishReport;

/// A listener shared between its owner and the bus.
pub type SharedListener<E> = Rc<RefCell<dyn Listener<E>>>;

/// Stable, generation-checked reference to a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerHandle {
    index: usize,
    generation: u32,
}

impl core::fmt::Display for ListenerHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "listener#{}v{}", self.index, self.generation)
    }
}

/// Which events a registration wants.
enum Interest<K> {
    All,
    Only(BTreeSet<K>),
}

impl<K: Ord> Interest<K> {
    fn accepts(&self, kind: &K) -> bool {
        match self {
            Self::All => true,
            Self::Only(kinds) => kinds.contains(kind),
        }
    }
}

struct Registration<E: BusEvent> {
    sequence: u64,
    name: String,
    interest: Interest<E::Kind>,
    listener: SharedListener<E>,
}

struct Slot<E: BusEvent> {
    generation: u32,
    registration: Option<Registration<E>>,
}

/// Synchronous publish/subscribe bus.
pub struct EventBus<E: BusEvent> {
    slots: Vec<Slot<E>>,
    vacant: Vec<usize>,
    /// Registration sequence -> handle, iterated in delivery order.
    order: BTreeMap<u64, ListenerHandle>,
    next_sequence: u64,
}

impl<E: BusEvent> EventBus<E> {
    /// Create an empty bus.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
            order: BTreeMap::new(),
            next_sequence: 0,
        }
    }

    /// Register a listener for every event published from now on.
    pub fn subscribe<L>(&mut self, listener: Rc<RefCell<L>>) -> ListenerHandle
    where
        L: Listener<E> + 'static,
    {
        self.register(listener, Interest::All)
    }

    /// Register a listener for events of the given kinds only.
    ///
    /// An empty `kinds` set registers a listener that never hears anything.
    pub fn subscribe_to<L, I>(&mut self, kinds: I, listener: Rc<RefCell<L>>) -> ListenerHandle
    where
        L: Listener<E> + 'static,
        I: IntoIterator<Item = E::Kind>,
    {
        self.register(listener, Interest::Only(kinds.into_iter().collect()))
    }

    /// Remove a registration.
    ///
    /// Returns `true` if a listener was removed. Stale or already-removed
    /// handles are ignored and return `false`.
    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        let Some(slot) = self.slots.get_mut(handle.index) else {
            return false;
        };
        if slot.generation != handle.generation {
            return false;
        }
        let Some(registration) = slot.registration.take() else {
            return false;
        };
        self.order.remove(&registration.sequence);
        if let Some(generation) = slot.generation.checked_add(1) {
            slot.generation = generation;
            self.vacant.push(handle.index);
        } else {
            debug!(%handle, "Slot retired");
        }
        debug!(%handle, listener = %registration.name, "Listener unsubscribed");
        true
    }

    /// Whether `handle` still refers to a live registration.
    pub fn contains(&self, handle: ListenerHandle) -> bool {
        self.resolve(handle).is_some()
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Remove every registration. Outstanding handles become stale.
    pub fn clear(&mut self) {
        let handles: Vec<ListenerHandle> = self.order.values().copied().collect();
        for handle in handles {
            self.unsubscribe(handle);
        }
    }

    /// Deliver `event` to every matching listener, in registration order.
    ///
    /// Never fails as a whole. Listeners that return an error, panic, or
    /// are found already borrowed are recorded in the returned report and
    /// the broadcast moves on to the next listener.
    pub fn publish(&mut self, event: &E) -> PublishReport {
        let kind = event.kind();
        let snapshot = self.snapshot(&kind);
        let mut report = PublishReport::default();

        for (handle, name, listener) in snapshot {
            let outcome = {
                let mut subscriptions = Subscriptions {
                    bus: self,
                    current: handle,
                };
                deliver(&listener, event, &mut subscriptions)
            };
            if let Err(err) = &outcome {
                warn!(%handle, listener = %name, ?kind, %err, "Listener failed");
            }
            report.record(handle, &name, outcome);
        }

        debug!(
            ?kind,
            attempted = report.attempted,
            failed = report.failures.len(),
            "Event published"
        );
        report
    }

    fn register(&mut self, listener: SharedListener<E>, interest: Interest<E::Kind>) -> ListenerHandle {
        let name = listener
            .try_borrow()
            .map_or_else(|_| String::from("<borrowed>"), |l| l.name().to_owned());
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);

        let registration = Registration {
            sequence,
            name,
            interest,
            listener,
        };

        let handle = self.place(registration);
        self.order.insert(sequence, handle);
        debug!(%handle, sequence, "Listener subscribed");
        handle
    }

    fn place(&mut self, registration: Registration<E>) -> ListenerHandle {
        if let Some(index) = self.vacant.pop() {
            if let Some(slot) = self.slots.get_mut(index) {
                slot.registration = Some(registration);
                return ListenerHandle {
                    index,
                    generation: slot.generation,
                };
            }
        }
        let index = self.slots.len();
        self.slots.push(Slot {
            generation: 0,
            registration: Some(registration),
        });
        ListenerHandle {
            index,
            generation: 0,
        }
    }

    fn resolve(&self, handle: ListenerHandle) -> Option<&Registration<E>> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.registration.as_ref())
    }

    fn snapshot(&self, kind: &E::Kind) -> Vec<(ListenerHandle, String, SharedListener<E>)> {
        self.order
            .values()
            .filter_map(|&handle| {
                let registration = self.resolve(handle)?;
                registration.interest.accepts(kind).then(|| {
                    (
                        handle,
                        registration.name.clone(),
                        Rc::clone(&registration.listener),
                    )
                })
            })
            .collect()
    }
}

impl<E: BusEvent> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: BusEvent> core::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.order.len())
            .field("slots", &self.slots.len())
            .finish()
    }
}

/// The part of the bus a listener may touch while an event is in flight.
///
/// Publishing is deliberately absent: a listener cannot start a nested
/// broadcast on the bus that is delivering to it.
pub struct Subscriptions<'bus, E: BusEvent> {
    bus: &'bus mut EventBus<E>,
    current: ListenerHandle,
}

impl<E: BusEvent> Subscriptions<'_, E> {
    /// Handle of the listener currently receiving the event.
    pub const fn current(&self) -> ListenerHandle {
        self.current
    }

    /// See [`EventBus::subscribe`]. The new listener first hears the next
    /// broadcast.
    pub fn subscribe<L>(&mut self, listener: Rc<RefCell<L>>) -> ListenerHandle
    where
        L: Listener<E> + 'static,
    {
        self.bus.subscribe(listener)
    }

    /// See [`EventBus::subscribe_to`].
    pub fn subscribe_to<L, I>(&mut self, kinds: I, listener: Rc<RefCell<L>>) -> ListenerHandle
    where
        L: Listener<E> + 'static,
        I: IntoIterator<Item = E::Kind>,
    {
        self.bus.subscribe_to(kinds, listener)
    }

    /// See [`EventBus::unsubscribe`]. The removed listener still receives
    /// the event currently in flight if it had not been reached yet.
    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        self.bus.unsubscribe(handle)
    }

    /// Remove the listener currently receiving the event.
    pub fn unsubscribe_current(&mut self) -> bool {
        self.bus.unsubscribe(self.current)
    }

    /// See [`EventBus::contains`].
    pub fn contains(&self, handle: ListenerHandle) -> bool {
        self.bus.contains(handle)
    }

    /// See [`EventBus::len`].
    pub fn len(&self) -> usize {
        self.bus.len()
    }

    /// See [`EventBus::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.bus.is_empty()
    }
}

fn deliver<E: BusEvent>(
    listener: &SharedListener<E>,
    event: &E,
    subscriptions: &mut Subscriptions<'_, E>,
) -> Result<(), ListenerError> {
    let Ok(mut guard) = listener.try_borrow_mut() else {
        return Err(ListenerError::Busy);
    };
    panic::catch_unwind(AssertUnwindSafe(|| guard.on_event(event, subscriptions))).unwrap_or_else(
        |payload| {
            Err(ListenerError::Panicked {
                message: panic_message(payload.as_ref()),
            })
        },
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| String::from("non-string panic payload"))
}
