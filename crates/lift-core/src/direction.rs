//! Travel direction.

use std::fmt;

/// Direction of travel for a car, or of a requested pickup for a landing.
///
/// `Idle` is only valid on a car at rest (or as a sentinel); hall calls must
/// be `Up` or `Down`.
///
/// The derive order matters: `Up < Down < Idle`, so collections keyed by
/// `(floor, direction)` iterate `Up` before `Down` at the same floor.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Idle,
}

impl Direction {
    /// The reverse travel direction.  `Idle` has no reverse.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Idle => Direction::Idle,
        }
    }

    /// Direction of travel from `from` toward `to`.  `Idle` if equal.
    #[inline]
    pub fn toward(from: u8, to: u8) -> Direction {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Direction::Up,
            std::cmp::Ordering::Less => Direction::Down,
            std::cmp::Ordering::Equal => Direction::Idle,
        }
    }

    /// `true` for `Up` and `Down`.
    #[inline]
    pub fn is_directional(self) -> bool {
        self != Direction::Idle
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Idle => "Idle",
        };
        f.write_str(s)
    }
}
