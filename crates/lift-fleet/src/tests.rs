//! Unit tests for the fleet domain types.

use lift_core::SimConfig;

fn test_config(num_floors: u8, num_elevators: u8) -> SimConfig {
    SimConfig {
        num_floors,
        num_elevators,
        ..SimConfig::default()
    }
}

#[cfg(test)]
mod floor_tests {
    use crate::Floor;

    #[test]
    fn initial_state() {
        let floor = Floor::new(5);
        assert_eq!(floor.number(), 5);
        assert!(!floor.is_up_requested());
        assert!(!floor.is_down_requested());
    }

    #[test]
    fn button_press_and_clear() {
        let mut floor = Floor::new(3);

        floor.press_up();
        assert!(floor.is_up_requested());
        assert!(!floor.is_down_requested());

        floor.press_down();
        assert!(floor.is_up_requested());
        assert!(floor.is_down_requested());

        floor.clear_up();
        assert!(!floor.is_up_requested());
        assert!(floor.is_down_requested());
    }
}

#[cfg(test)]
mod car_tests {
    use lift_core::{CarId, CarState, Direction};

    use crate::Car;

    #[test]
    fn initial_state() {
        let car = Car::new(CarId(0), 6, 1);
        assert_eq!(car.id(), CarId(0));
        assert_eq!(car.current_floor(), 1);
        assert_eq!(car.direction(), Direction::Idle);
        assert_eq!(car.state(), CarState::Idle);
        assert_eq!(car.passenger_count(), 0);
        assert_eq!(car.capacity(), 6);
        assert_eq!(car.ticks_remaining(), 0);
    }

    #[test]
    fn car_calls_are_a_set() {
        let mut car = Car::new(CarId(0), 6, 1);
        assert!(!car.has_any_car_calls());

        car.add_car_call(5);
        car.add_car_call(3);
        car.add_car_call(8);
        car.add_car_call(5);

        assert!(car.has_any_car_calls());
        assert!(car.has_car_call_at(5));
        assert!(!car.has_car_call_at(4));
        assert_eq!(car.car_calls().len(), 3);

        car.remove_car_call(5);
        assert!(!car.has_car_call_at(5));
    }

    #[test]
    fn state_transitions() {
        let mut car = Car::new(CarId(0), 6, 1);

        car.start_moving(Direction::Up, 2);
        assert_eq!(car.state(), CarState::Moving);
        assert_eq!(car.direction(), Direction::Up);
        assert_eq!(car.ticks_remaining(), 2);

        car.decrement_tick();
        assert_eq!(car.ticks_remaining(), 1);
        car.decrement_tick();
        assert_eq!(car.ticks_remaining(), 0);
        car.decrement_tick();
        assert_eq!(car.ticks_remaining(), 0, "timer saturates at zero");

        car.arrive_at(2);
        assert_eq!(car.current_floor(), 2);

        car.open_doors(3);
        assert_eq!(car.state(), CarState::DoorsOpening);

        car.set_doors_open(3);
        assert_eq!(car.state(), CarState::DoorsOpen);

        car.close_doors(1);
        assert_eq!(car.state(), CarState::DoorsClosing);

        car.set_idle();
        assert_eq!(car.state(), CarState::Idle);
        assert_eq!(car.direction(), Direction::Idle);
        assert_eq!(car.ticks_remaining(), 0);
    }

    #[test]
    fn range_queries() {
        let mut car = Car::new(CarId(0), 6, 5);
        car.add_car_call(8);
        car.add_car_call(3);
        assert!(car.has_calls_above());
        assert!(car.has_calls_below());

        car.remove_car_call(8);
        assert!(!car.has_calls_above());
        assert!(car.has_calls_below());
    }

    #[test]
    fn passengers_clamp_to_capacity() {
        let mut car = Car::new(CarId(0), 3, 1);
        assert!(car.can_board());

        for _ in 0..5 {
            car.board_passenger();
        }
        assert_eq!(car.passenger_count(), 3);
        assert!(!car.can_board());

        car.alight_passenger();
        assert_eq!(car.passenger_count(), 2);
        assert!(car.can_board());

        for _ in 0..5 {
            car.alight_passenger();
        }
        assert_eq!(car.passenger_count(), 0);
    }

    #[test]
    fn cost_idle_is_distance() {
        let car = Car::new(CarId(0), 6, 2);
        assert_eq!(car.cost_to_serve(7, Direction::Up, 10), 5);
        assert_eq!(car.cost_to_serve(1, Direction::Up, 10), 1);
    }

    #[test]
    fn cost_same_direction_on_the_way_is_distance() {
        let mut car = Car::new(CarId(0), 6, 2);
        car.start_moving(Direction::Up, 2);
        assert_eq!(car.cost_to_serve(5, Direction::Up, 10), 3);
    }

    #[test]
    fn cost_reverse_pays_penalty() {
        let mut car = Car::new(CarId(0), 6, 2);
        car.start_moving(Direction::Down, 2);
        // Wrong direction: distance 3 plus 2 * 10.
        assert_eq!(car.cost_to_serve(5, Direction::Up, 10), 23);

        // Same direction but already passed: still penalized.
        let mut passed = Car::new(CarId(1), 6, 6);
        passed.start_moving(Direction::Up, 2);
        assert_eq!(passed.cost_to_serve(5, Direction::Up, 10), 21);
    }
}

#[cfg(test)]
mod building_tests {
    use lift_core::{CarId, Direction, HallCall, Tick};

    use super::test_config;
    use crate::Building;

    #[test]
    fn construction() {
        let building = Building::new(&test_config(10, 3));
        assert_eq!(building.num_floors(), 10);
        assert_eq!(building.num_cars(), 3);
        for id in building.car_ids() {
            assert_eq!(building.car(id).current_floor(), 1);
        }
        assert_eq!(building.floor(3).number(), 3);
    }

    #[test]
    fn floor_and_car_validation() {
        let building = Building::new(&test_config(5, 2));
        assert!(building.is_valid_floor(1));
        assert!(building.is_valid_floor(5));
        assert!(!building.is_valid_floor(0));
        assert!(!building.is_valid_floor(6));
        assert!(building.is_valid_car(CarId(1)));
        assert!(!building.is_valid_car(CarId(2)));
    }

    #[test]
    fn hall_call_register_query_clear() {
        let mut building = Building::new(&test_config(10, 3));
        assert!(!building.has_hall_call(5, Direction::Up));

        building.register_hall_call(5, Direction::Up);
        assert!(building.has_hall_call(5, Direction::Up));
        assert!(!building.has_hall_call(5, Direction::Down));
        assert!(building.any_hall_calls());

        let calls = building.pressed_hall_calls();
        assert_eq!(calls, vec![HallCall::new(5, Direction::Up)]);

        building.clear_hall_call(5, Direction::Up);
        assert!(!building.has_hall_call(5, Direction::Up));
        assert!(!building.any_hall_calls());
    }

    #[test]
    fn boundary_floors_reject_impossible_directions() {
        let mut building = Building::new(&test_config(10, 1));
        building.register_hall_call(1, Direction::Down);
        building.register_hall_call(10, Direction::Up);
        assert!(!building.has_hall_call(1, Direction::Down));
        assert!(!building.has_hall_call(10, Direction::Up));

        building.register_hall_call(1, Direction::Up);
        building.register_hall_call(10, Direction::Down);
        assert!(building.has_hall_call(1, Direction::Up));
        assert!(building.has_hall_call(10, Direction::Down));
    }

    #[test]
    fn pressed_calls_sorted_floor_then_direction() {
        let mut building = Building::new(&test_config(10, 1));
        building.register_hall_call(7, Direction::Down);
        building.register_hall_call(3, Direction::Up);
        building.register_hall_call(3, Direction::Down);
        let calls = building.pressed_hall_calls();
        assert_eq!(
            calls,
            vec![
                HallCall::new(3, Direction::Up),
                HallCall::new(3, Direction::Down),
                HallCall::new(7, Direction::Down),
            ]
        );
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut building = Building::new(&test_config(8, 2));
        building.car_mut(CarId(1)).add_car_call(4);
        building.register_hall_call(2, Direction::Up);

        let snap = building.snapshot(Tick(9));
        assert_eq!(snap.tick, Tick(9));
        assert_eq!(snap.cars.len(), 2);
        assert_eq!(snap.car(CarId(1)).car_calls, vec![4]);
        assert_eq!(snap.hall_calls, vec![HallCall::new(2, Direction::Up)]);
    }
}
