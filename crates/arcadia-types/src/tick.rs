//! Per-tick context handed to state machine `update` hooks.

use serde::{Deserialize, Serialize};

/// Where the host's game loop currently is.
///
/// The host owns the loop and the clock; states only read this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tick {
    /// Tick number, starting at 0.
    pub number: u64,
    /// Simulated milliseconds since the previous tick.
    pub delta_ms: u32,
}

impl Tick {
    /// The first tick of a run.
    pub const fn first(delta_ms: u32) -> Self {
        Self {
            number: 0,
            delta_ms,
        }
    }

    /// The tick after this one, or `None` if the counter would overflow.
    pub const fn next(self) -> Option<Self> {
        match self.number.checked_add(1) {
            Some(number) => Some(Self {
                number,
                delta_ms: self.delta_ms,
            }),
            None => None,
        }
    }
}
