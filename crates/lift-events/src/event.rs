//! Events — the single processing stream of the engine.

use lift_core::{CarId, Direction};

/// One item in the engine's event stream.
///
/// `HallCall` and `CarCall` originate from external producers; the three
/// elevator events are emitted by the state-machine driver as cars complete
/// timed phases and feed back into the dispatcher.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// A landing button was pressed.  `direction` is `Up` or `Down`.
    HallCall { floor: u8, direction: Direction },

    /// An in-cabin destination button was pressed.
    CarCall { car: CarId, floor: u8 },

    /// A car completed a single-floor transit and stopped at `floor`.
    ElevatorArrived { car: CarId, floor: u8 },

    /// A car's doors finished opening at `floor`.
    DoorsOpened { car: CarId, floor: u8 },

    /// A car's doors finished closing and it has more work to do.
    DoorsClosed { car: CarId },

    /// Reserved time-advance signal.  Not pushed by default; the event
    /// router ignores it.
    Tick,

    /// Graceful termination request.
    Shutdown,
}
