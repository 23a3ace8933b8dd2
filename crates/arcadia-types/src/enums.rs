//! Enumeration types shared by the bus, the state machines and the host.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Event kinds
// ---------------------------------------------------------------------------

/// The category of a [`GameEvent`](crate::GameEvent).
///
/// Listeners filter on kinds rather than on full event values, so every
/// event variant has exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// An entity fell off something.
    EntityFell,
    /// An entity moved into a region of the level.
    EnteredRegion,
    /// An entity's state machine moved to another state.
    StateChanged,
    /// An entity triggered a special ability.
    AbilityUsed,
}

impl EventKind {
    /// Every event kind, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::EntityFell,
        Self::EnteredRegion,
        Self::StateChanged,
        Self::AbilityUsed,
    ];
}

// ---------------------------------------------------------------------------
// Input signals
// ---------------------------------------------------------------------------

/// A discrete input signal delivered to an entity's state machine.
///
/// Inputs come from the host (controller polling, physics contacts). The
/// machine never invents inputs of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Input {
    /// The jump button was pressed.
    PressA,
    /// Down was pressed on the directional pad.
    PressDown,
    /// Down was released on the directional pad.
    ReleaseDown,
    /// Physics reported that the entity touched the ground.
    Land,
}

// ---------------------------------------------------------------------------
// Abilities and regions
// ---------------------------------------------------------------------------

/// A special ability an entity can unleash as a side effect of its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    /// Released after ducking long enough to fill the charge meter.
    SuperBomb,
    /// Released when a dive ends on the ground.
    GroundPound,
}

/// A named area of the level an entity can stand in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Solid ground.
    Ground,
    /// The bridge over the river.
    Bridge,
    /// The river below the bridge.
    River,
}

impl core::fmt::Display for Region {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Ground => "ground",
            Self::Bridge => "bridge",
            Self::River => "river",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_use_snake_case_names() {
        let json = serde_json::to_string(&Input::ReleaseDown).ok();
        assert_eq!(json.as_deref(), Some("\"release_down\""));
    }

    #[test]
    fn all_kinds_are_distinct() {
        let unique: std::collections::BTreeSet<_> = EventKind::ALL.iter().collect();
        assert_eq!(unique.len(), EventKind::ALL.len());
    }

    #[test]
    fn region_display() {
        assert_eq!(Region::Bridge.to_string(), "bridge");
    }
}
