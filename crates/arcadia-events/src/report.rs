//! Outcome of a single `publish` call.

use crate::bus::ListenerHandle;
use crate::error::ListenerError;

/// One listener that failed during a broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    /// Registration handle of the failed listener.
    pub handle: ListenerHandle,
    /// The listener's name at registration time.
    pub listener: String,
    /// What went wrong.
    pub error: ListenerError,
}

/// Summary of a broadcast, returned once every listener has been invoked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Number of listeners the event was handed to.
    pub attempted: usize,
    /// Listeners that failed, in delivery order.
    pub failures: Vec<ListenerFailure>,
}

impl PublishReport {
    /// Number of listeners that handled the event without error.
    pub const fn succeeded(&self) -> usize {
        self.attempted.saturating_sub(self.failures.len())
    }

    /// Whether every listener handled the event.
    pub const fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn record(
        &mut self,
        handle: ListenerHandle,
        listener: &str,
        outcome: Result<(), ListenerError>,
    ) {
        self.attempted = self.attempted.saturating_add(1);
        if let Err(error) = outcome {
            self.failures.push(ListenerFailure {
                handle,
                listener: listener.to_owned(),
                error,
            });
        }
    }
}
