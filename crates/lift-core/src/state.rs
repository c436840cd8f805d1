//! Car motion/door lifecycle states.

use std::fmt;

/// The motion/door lifecycle of a single car.
///
/// Every state except `Idle` is timed: the car's `ticks_remaining` counter
/// runs down and the state machine driver performs the transition when it
/// reaches zero.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CarState {
    /// Stationary, no pending work.
    #[default]
    Idle,
    /// Travelling between adjacent floors.
    Moving,
    /// Arrived, doors opening.
    DoorsOpening,
    /// Doors open; passengers board/alight.
    DoorsOpen,
    /// Doors closing (one tick).
    DoorsClosing,
}

impl CarState {
    /// `true` for the three states where the car is stationary with its
    /// doors somewhere in the open cycle.
    #[inline]
    pub fn doors_in_cycle(self) -> bool {
        matches!(
            self,
            CarState::DoorsOpening | CarState::DoorsOpen | CarState::DoorsClosing
        )
    }
}

impl fmt::Display for CarState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CarState::Idle => "Idle",
            CarState::Moving => "Moving",
            CarState::DoorsOpening => "DoorsOpening",
            CarState::DoorsOpen => "DoorsOpen",
            CarState::DoorsClosing => "DoorsClosing",
        };
        f.write_str(s)
    }
}
