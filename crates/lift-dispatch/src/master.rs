//! Centralized dispatch: one assignment table, one decision maker.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use lift_core::{CarId, CarState, Direction, HallCall, SimConfig};
use lift_events::{Event, EventQueue};
use lift_fleet::Building;

use crate::dispatcher::{dispatch_to_nearest, served_directions, Dispatcher};

/// The centralized policy: every hall call is assigned to exactly one car by
/// a cost scan, and the table entry lives until that car arrives to serve it.
pub struct MasterDispatcher {
    /// `(floor, direction) -> car`.  At most one entry per key.
    assignments: BTreeMap<HallCall, CarId>,
    queue: Arc<EventQueue<Event>>,
    num_floors: u8,
    door_open_ticks: u32,
    floor_travel_ticks: u32,
}

impl MasterDispatcher {
    pub fn new(config: &SimConfig, queue: Arc<EventQueue<Event>>) -> Self {
        Self {
            assignments: BTreeMap::new(),
            queue,
            num_floors: config.num_floors,
            door_open_ticks: config.door_open_ticks,
            floor_travel_ticks: config.floor_travel_ticks,
        }
    }

    // ── Read-only inspection ──────────────────────────────────────────────

    /// The car assigned to `(floor, dir)`, if any.
    pub fn assignment(&self, floor: u8, dir: Direction) -> Option<CarId> {
        self.assignments.get(&HallCall::new(floor, dir)).copied()
    }

    /// All live assignments, ascending by `(floor, direction)`.
    pub fn assignments(&self) -> impl Iterator<Item = (HallCall, CarId)> + '_ {
        self.assignments.iter().map(|(&k, &v)| (k, v))
    }

    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Lowest-cost car for `(floor, dir)`; ties broken by lowest id.
    fn select_car(&self, building: &Building, floor: u8, dir: Direction) -> Option<CarId> {
        building
            .cars()
            .iter()
            .min_by_key(|car| car.cost_to_serve(floor, dir, self.num_floors))
            .map(|car| car.id())
    }

    /// Car calls plus every assigned landing floor for this car.
    fn destinations_for(&self, building: &Building, car_id: CarId) -> BTreeSet<u8> {
        let mut destinations = building.car(car_id).car_calls().clone();
        destinations.extend(
            self.assignments
                .iter()
                .filter(|(_, &c)| c == car_id)
                .map(|(key, _)| key.floor),
        );
        destinations
    }

    fn dispatch_car(&mut self, building: &mut Building, car_id: CarId) {
        let destinations = self.destinations_for(building, car_id);
        dispatch_to_nearest(
            building,
            car_id,
            &destinations,
            self.door_open_ticks,
            self.floor_travel_ticks,
            &self.queue,
        );
    }
}

impl Dispatcher for MasterDispatcher {
    fn name(&self) -> &'static str {
        "master"
    }

    fn handle_hall_call(&mut self, building: &mut Building, floor: u8, direction: Direction) {
        let key = HallCall::new(floor, direction);
        if self.assignments.contains_key(&key) {
            return;
        }

        building.register_hall_call(floor, direction);

        if let Some(best) = self.select_car(building, floor, direction) {
            log::debug!("assigned hall call {key} to {best}");
            self.assignments.insert(key, best);
            self.dispatch_car(building, best);
        }
    }

    fn handle_car_call(&mut self, building: &mut Building, car: CarId, floor: u8) {
        building.car_mut(car).add_car_call(floor);
        self.dispatch_car(building, car);
    }

    fn on_elevator_arrived(&mut self, building: &mut Building, car: CarId, floor: u8) {
        building.car_mut(car).remove_car_call(floor);

        let travel = building.car(car).direction();
        let onward = travel.is_directional()
            && self.has_work_beyond(building, car, floor, travel);
        for dir in served_directions(travel, onward).into_iter().flatten() {
            let key = HallCall::new(floor, dir);
            if self.assignments.get(&key) == Some(&car) {
                self.assignments.remove(&key);
                building.clear_hall_call(floor, dir);
                log::debug!("{car} served hall call {key}");
                break;
            }
        }
    }

    fn on_doors_closed(&mut self, building: &mut Building, car: CarId) {
        self.dispatch_car(building, car);
    }

    fn tick(&mut self, building: &mut Building) {
        for car_id in building.car_ids() {
            if building.car(car_id).state() == CarState::Idle {
                self.dispatch_car(building, car_id);
            }
        }
    }

    fn should_stop_at(&self, building: &Building, car: CarId, floor: u8) -> bool {
        if building.car(car).has_car_call_at(floor) {
            return true;
        }
        let dir = building.car(car).direction();
        self.assignment(floor, dir) == Some(car)
    }

    fn has_work_beyond(
        &self,
        building: &Building,
        car: CarId,
        floor: u8,
        direction: Direction,
    ) -> bool {
        let beyond = |f: u8| match direction {
            Direction::Up => f > floor,
            Direction::Down => f < floor,
            Direction::Idle => false,
        };
        building.car(car).car_calls().iter().any(|&f| beyond(f))
            || self
                .assignments
                .iter()
                .any(|(key, &c)| c == car && beyond(key.floor))
    }
}
