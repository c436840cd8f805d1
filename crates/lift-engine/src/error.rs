use lift_core::{CarId, Direction, LiftError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] LiftError),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Rejection reasons at the request ingress.  Invalid requests never reach
/// the event queue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("floor {floor} out of range 1..={num_floors}")]
    FloorOutOfRange { floor: u8, num_floors: u8 },

    #[error("{car} out of range (fleet has {num_elevators} cars)")]
    CarOutOfRange { car: CarId, num_elevators: u8 },

    #[error("hall call requires an up or down direction")]
    DirectionlessHallCall,

    #[error("no {direction} service from floor {floor}")]
    ImpossibleDirection { floor: u8, direction: Direction },
}
