//! Strongly typed car identifier.
//!
//! Cars are numbered from zero, so a `CarId` doubles as an index into the
//! building's car vector.  The inner integer is `pub` to allow direct
//! indexing via `id.0 as usize`, but callers should prefer the `.index()`
//! helper for clarity.

use std::fmt;

/// Zero-based index of a car in the building's fleet.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarId(pub u8);

impl CarId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "car {}", self.0)
    }
}

impl From<CarId> for usize {
    #[inline(always)]
    fn from(id: CarId) -> usize {
        id.0 as usize
    }
}
