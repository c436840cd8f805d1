//! The `Dispatcher` trait — the engine's pluggable decision point.

use std::collections::BTreeSet;
use std::sync::Arc;

use lift_core::{CarId, CarState, ControllerKind, Direction, SimConfig};
use lift_events::{Event, EventQueue};
use lift_fleet::Building;

use crate::{DistributedDispatcher, MasterDispatcher};

/// Pluggable group-dispatch policy.
///
/// The engine routes every drained event to exactly one of these callbacks
/// and invokes [`tick`][Self::tick] once per tick after the state machine
/// advances.  All calls happen on the single consumer thread.
///
/// The two stop-decision queries ([`should_stop_at`][Self::should_stop_at]
/// and [`has_work_beyond`][Self::has_work_beyond]) let the state-machine
/// driver skip floors that are nobody's destination without opening doors.
pub trait Dispatcher: Send {
    /// Policy name for logs and status output.
    fn name(&self) -> &'static str;

    /// A landing button was pressed.  Idempotent for an already-tracked
    /// `(floor, direction)` key.
    fn handle_hall_call(&mut self, building: &mut Building, floor: u8, direction: Direction);

    /// An in-cabin destination button was pressed.  Adds to the car's call
    /// set (idempotent) and dispatches the car if it is idle.
    fn handle_car_call(&mut self, building: &mut Building, car: CarId, floor: u8);

    /// A car stopped at `floor`: clear the served car call and whatever
    /// landing this car was committed to there.
    fn on_elevator_arrived(&mut self, building: &mut Building, car: CarId, floor: u8);

    /// Doors finished opening.  Hook; no dispatch duties.
    fn on_doors_opened(&mut self, building: &mut Building, car: CarId, floor: u8) {
        let _ = (building, car, floor);
    }

    /// Doors finished closing with work outstanding: re-dispatch.
    fn on_doors_closed(&mut self, building: &mut Building, car: CarId);

    /// Once per tick, after the state machine advances.  Re-dispatches idle
    /// cars (and, for the claim board, runs the per-car claim scan).
    fn tick(&mut self, building: &mut Building);

    /// Should `car`, having just completed a single-floor transit to
    /// `floor`, stop there?  True when the floor is one of the car's
    /// destinations (car call, or a landing committed to this car in its
    /// travel direction).
    fn should_stop_at(&self, building: &Building, car: CarId, floor: u8) -> bool;

    /// Does `car` have any destination strictly past `floor` in
    /// `direction`?  Callers pass the car's current floor.
    fn has_work_beyond(
        &self,
        building: &Building,
        car: CarId,
        floor: u8,
        direction: Direction,
    ) -> bool;
}

/// Construct the policy selected by `config.controller`.
pub fn build_dispatcher(
    config: &SimConfig,
    queue: Arc<EventQueue<Event>>,
) -> Box<dyn Dispatcher> {
    match config.controller {
        ControllerKind::Master => Box::new(MasterDispatcher::new(config, queue)),
        ControllerKind::Distributed => Box::new(DistributedDispatcher::new(config, queue)),
    }
}

// ── Shared dispatch step ──────────────────────────────────────────────────────

/// Send an idle car toward the nearest of `destinations` (ties: lowest
/// floor).  A target at the car's own floor opens the doors in place and
/// pushes a synthetic `ElevatorArrived` so arrival bookkeeping runs for the
/// landing being served.
///
/// Non-idle cars are left alone.  Returns `true` if the car was started.
pub(crate) fn dispatch_to_nearest(
    building: &mut Building,
    car_id: CarId,
    destinations: &BTreeSet<u8>,
    door_open_ticks: u32,
    floor_travel_ticks: u32,
    queue: &EventQueue<Event>,
) -> bool {
    if building.car(car_id).state() != CarState::Idle {
        return false;
    }
    let current = building.car(car_id).current_floor();
    let Some(target) = destinations
        .iter()
        .copied()
        .min_by_key(|t| current.abs_diff(*t))
    else {
        return false;
    };

    if target == current {
        building.car_mut(car_id).open_doors(door_open_ticks);
        queue.push(Event::ElevatorArrived {
            car: car_id,
            floor: current,
        });
    } else {
        let direction = Direction::toward(current, target);
        building.car_mut(car_id).start_moving(direction, floor_travel_ticks);
        log::debug!("{} -> floor {target} ({direction})", car_id);
    }
    true
}

/// The landing directions an arrival at `floor` can serve, most specific
/// first.
///
/// A car travelling with onward work serves only its travel direction.  A
/// stop that ends the car's run also serves the opposite landing (the
/// commitment dissolves with the stop), and an in-place service
/// (`direction == Idle`) serves whichever landing the car holds there.
pub(crate) fn served_directions(
    travel: Direction,
    has_onward_work: bool,
) -> [Option<Direction>; 2] {
    match travel {
        Direction::Idle => [Some(Direction::Up), Some(Direction::Down)],
        d if has_onward_work => [Some(d), None],
        d => [Some(d), Some(d.opposite())],
    }
}
