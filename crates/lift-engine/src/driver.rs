//! The per-car state-machine driver.
//!
//! The driver is authoritative for car position: nothing else mutates
//! `current_floor`.  Each completed timed phase pushes its event onto the
//! queue; the events are routed to the dispatcher during the same tick's
//! drain phase.

use lift_core::{CarId, CarState, Direction};
use lift_dispatch::Dispatcher;
use lift_events::{Event, EventQueue};
use lift_fleet::Building;

/// Doors take exactly one tick to close.
pub const DOOR_CLOSE_TICKS: u32 = 1;

/// Advance every car's motion/door lifecycle by one tick.
///
/// Transition table (on the timer reaching zero):
/// - `Moving`       → arrive at the next floor; stop (doors opening +
///   `ElevatorArrived`) if the dispatcher wants the stop or the run is over,
///   else keep moving for another `floor_travel_ticks` without opening doors.
/// - `DoorsOpening` → `DoorsOpen` + `DoorsOpened`.
/// - `DoorsOpen`    → `DoorsClosing` (one tick).
/// - `DoorsClosing` → `Idle`; `DoorsClosed` is emitted if the car still has
///   car calls or any landing anywhere is pressed, so the dispatcher gets a
///   chance to re-dispatch.
pub fn advance_cars(
    building: &mut Building,
    dispatcher: &dyn Dispatcher,
    queue: &EventQueue<Event>,
    door_open_ticks: u32,
    floor_travel_ticks: u32,
) {
    let car_ids: Vec<CarId> = building.car_ids().collect();
    for car_id in car_ids {
        match building.car(car_id).state() {
            CarState::Idle => {}
            CarState::Moving => {
                building.car_mut(car_id).decrement_tick();
                if building.car(car_id).ticks_remaining() == 0 {
                    complete_transit(
                        building,
                        dispatcher,
                        queue,
                        car_id,
                        door_open_ticks,
                        floor_travel_ticks,
                    );
                }
            }
            CarState::DoorsOpening => {
                building.car_mut(car_id).decrement_tick();
                if building.car(car_id).ticks_remaining() == 0 {
                    building.car_mut(car_id).set_doors_open(door_open_ticks);
                    queue.push(Event::DoorsOpened {
                        car: car_id,
                        floor: building.car(car_id).current_floor(),
                    });
                }
            }
            CarState::DoorsOpen => {
                building.car_mut(car_id).decrement_tick();
                if building.car(car_id).ticks_remaining() == 0 {
                    building.car_mut(car_id).close_doors(DOOR_CLOSE_TICKS);
                }
            }
            CarState::DoorsClosing => {
                building.car_mut(car_id).decrement_tick();
                if building.car(car_id).ticks_remaining() == 0 {
                    let more_work = building.car(car_id).has_any_car_calls()
                        || building.any_hall_calls();
                    building.car_mut(car_id).set_idle();
                    if more_work {
                        queue.push(Event::DoorsClosed { car: car_id });
                    }
                }
            }
        }
    }
}

/// A car finished a single-floor transit: move it one floor and decide
/// between stopping and flying by.
fn complete_transit(
    building: &mut Building,
    dispatcher: &dyn Dispatcher,
    queue: &EventQueue<Event>,
    car_id: CarId,
    door_open_ticks: u32,
    floor_travel_ticks: u32,
) {
    let direction = building.car(car_id).direction();
    let current = building.car(car_id).current_floor();
    let next = match direction {
        Direction::Up => current + 1,
        Direction::Down => current - 1,
        Direction::Idle => unreachable!("moving car without a direction"),
    };
    debug_assert!(
        building.is_valid_floor(next),
        "{car_id} ran past the building ({next})"
    );

    building.car_mut(car_id).arrive_at(next);

    // Fly-by: not a destination and the run continues past this floor.
    let stop = dispatcher.should_stop_at(building, car_id, next)
        || !dispatcher.has_work_beyond(building, car_id, next, direction);
    if stop {
        building.car_mut(car_id).open_doors(door_open_ticks);
        queue.push(Event::ElevatorArrived {
            car: car_id,
            floor: next,
        });
        log::debug!("{car_id} stopped at floor {next}");
    } else {
        building
            .car_mut(car_id)
            .start_moving(direction, floor_travel_ticks);
    }
}
