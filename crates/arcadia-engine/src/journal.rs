//! A listener that traces every event and tallies them by kind.

use std::collections::BTreeMap;

use arcadia_events::{Listener, ListenerError, Subscriptions};
use arcadia_types::{EventKind, GameEvent};
use tracing::debug;

/// Event tally for the end-of-run summary.
#[derive(Debug, Default)]
pub struct Journal {
    counts: BTreeMap<EventKind, u64>,
}

impl Journal {
    /// Every kind seen at least once, with its count.
    pub const fn counts(&self) -> &BTreeMap<EventKind, u64> {
        &self.counts
    }
}

impl Listener<GameEvent> for Journal {
    fn name(&self) -> &str {
        "journal"
    }

    fn on_event(
        &mut self,
        event: &GameEvent,
        _subscriptions: &mut Subscriptions<'_, GameEvent>,
    ) -> Result<(), ListenerError> {
        debug!(?event, "Event");
        let count = self.counts.entry(event.kind()).or_insert(0);
        *count = count.saturating_add(1);
        Ok(())
    }
}
