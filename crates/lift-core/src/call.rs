//! The hall-call key — the unit of group-dispatch bookkeeping.

use std::fmt;

use crate::Direction;

/// A landing-button press: `(floor, direction)`.
///
/// This is the key of the master's assignment table and the distributed
/// claim board.  `direction` must be `Up` or `Down`; ingress validation
/// rejects directionless hall calls before they reach either structure.
///
/// Ordering is `(floor, direction)` with `Up < Down`, so an ordered scan of
/// a claim board visits the lowest floor first and `Up` before `Down` at the
/// same floor — exactly the tie-break order the claim scan needs.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HallCall {
    pub floor: u8,
    pub direction: Direction,
}

impl HallCall {
    #[inline]
    pub fn new(floor: u8, direction: Direction) -> Self {
        Self { floor, direction }
    }
}

impl fmt::Display for HallCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.direction {
            Direction::Up => "U",
            Direction::Down => "D",
            Direction::Idle => "?",
        };
        write!(f, "{}{}", self.floor, arrow)
    }
}
