//! Read-only views of the fleet, published by the engine once per tick.

use std::fmt;

use lift_core::{CarId, CarState, Direction, HallCall, Tick};

/// Snapshot of a single car.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarSnapshot {
    pub id: CarId,
    pub floor: u8,
    pub state: CarState,
    pub direction: Direction,
    pub passenger_count: u8,
    /// Destination floors, ascending.
    pub car_calls: Vec<u8>,
}

impl fmt::Display for CarSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: floor {} {} {} passengers={}",
            self.id, self.floor, self.state, self.direction, self.passenger_count
        )?;
        if !self.car_calls.is_empty() {
            write!(f, " carCalls={:?}", self.car_calls)?;
        }
        Ok(())
    }
}

/// Snapshot of the whole fleet at one tick boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetSnapshot {
    pub tick: Tick,
    pub cars: Vec<CarSnapshot>,
    /// All pressed landing buttons, ascending by floor, `Up` before `Down`.
    pub hall_calls: Vec<HallCall>,
}

impl FleetSnapshot {
    pub fn car(&self, id: CarId) -> &CarSnapshot {
        &self.cars[id.index()]
    }
}
