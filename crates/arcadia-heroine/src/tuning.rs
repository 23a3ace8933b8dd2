//! Tunable numbers for the heroine's movement and abilities.
//!
//! The engine builds a [`HeroineTuning`] from the `heroine` section of
//! `arcadia-config.yaml` and hands it to [`Heroine::new`](crate::Heroine::new).

/// Movement and ability parameters for one heroine.
///
/// Velocities are in whole units per tick; positive is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroineTuning {
    /// Ticks spent ducking before the super bomb fires (default: 30).
    ///
    /// The bomb fires on the first tick the charge goes past this value.
    pub max_charge: u32,

    /// Upward velocity applied when a jump starts (default: 12).
    pub jump_velocity: i32,

    /// Downward velocity applied when a dive starts (default: -20).
    pub dive_velocity: i32,

    /// Velocity lost per airborne tick (default: 1).
    pub gravity: i32,
}

impl Default for HeroineTuning {
    fn default() -> Self {
        Self {
            max_charge: 30,
            jump_velocity: 12,
            dive_velocity: -20,
            gravity: 1,
        }
    }
}
