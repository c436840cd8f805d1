//! Decentralized dispatch: cars claim landings off a shared board.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use lift_core::{CarId, CarState, Direction, HallCall, SimConfig};
use lift_events::{Event, EventQueue};
use lift_fleet::Building;

use crate::dispatcher::{dispatch_to_nearest, served_directions, Dispatcher};

/// The decentralized policy: new hall calls land on the board unclaimed
/// (`None`); each tick every car, in ascending id order, may claim the
/// nearest unclaimed entry.  First-to-tick wins — the id asymmetry is
/// deliberate and pinned by tests.
pub struct DistributedDispatcher {
    /// `(floor, direction) -> Some(claimant)` or `None` while unclaimed.
    claim_board: BTreeMap<HallCall, Option<CarId>>,
    queue: Arc<EventQueue<Event>>,
    door_open_ticks: u32,
    floor_travel_ticks: u32,
}

impl DistributedDispatcher {
    pub fn new(config: &SimConfig, queue: Arc<EventQueue<Event>>) -> Self {
        Self {
            claim_board: BTreeMap::new(),
            queue,
            door_open_ticks: config.door_open_ticks,
            floor_travel_ticks: config.floor_travel_ticks,
        }
    }

    // ── Read-only inspection ──────────────────────────────────────────────

    /// The board entry for `(floor, dir)`: absent, unclaimed (`Some(None)`),
    /// or claimed (`Some(Some(car))`).
    pub fn claim(&self, floor: u8, dir: Direction) -> Option<Option<CarId>> {
        self.claim_board.get(&HallCall::new(floor, dir)).copied()
    }

    /// All board entries, ascending by `(floor, direction)`.
    pub fn claims(&self) -> impl Iterator<Item = (HallCall, Option<CarId>)> + '_ {
        self.claim_board.iter().map(|(&k, &v)| (k, v))
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn holds_any_claim(&self, car_id: CarId) -> bool {
        self.claim_board.values().any(|&c| c == Some(car_id))
    }

    /// One claim attempt for `car_id`.
    ///
    /// A car that is underway and committed — to in-car work or to a landing
    /// it already claimed — does not grab new landings.  Everyone else takes
    /// the nearest unclaimed entry (ties: lowest floor, `Up` before `Down`,
    /// which is exactly the board's iteration order).
    fn try_claim_calls(&mut self, building: &Building, car_id: CarId) {
        let car = building.car(car_id);
        let committed = car.state() != CarState::Idle
            && (car.has_any_car_calls() || self.holds_any_claim(car_id));
        if committed {
            return;
        }

        let current = car.current_floor();
        let nearest = self
            .claim_board
            .iter()
            .filter(|(_, claim)| claim.is_none())
            .map(|(&key, _)| key)
            .min_by_key(|key| current.abs_diff(key.floor));

        if let Some(key) = nearest {
            log::debug!("{car_id} claimed hall call {key}");
            self.claim_board.insert(key, Some(car_id));
        }
    }

    /// Car calls plus every landing floor this car has claimed.
    fn destinations_for(&self, building: &Building, car_id: CarId) -> BTreeSet<u8> {
        let mut destinations = building.car(car_id).car_calls().clone();
        destinations.extend(
            self.claim_board
                .iter()
                .filter(|(_, &claim)| claim == Some(car_id))
                .map(|(key, _)| key.floor),
        );
        destinations
    }

    fn decide_next_action(&mut self, building: &mut Building, car_id: CarId) {
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

impl Dispatcher for DistributedDispatcher {
    fn name(&self) -> &'static str {
        "distributed"
    }

    fn handle_hall_call(&mut self, building: &mut Building, floor: u8, direction: Direction) {
        building.register_hall_call(floor, direction);
        self.claim_board
            .entry(HallCall::new(floor, direction))
            .or_insert(None);
    }

    fn handle_car_call(&mut self, building: &mut Building, car: CarId, floor: u8) {
        building.car_mut(car).add_car_call(floor);
        self.decide_next_action(building, car);
    }

    fn on_elevator_arrived(&mut self, building: &mut Building, car: CarId, floor: u8) {
        building.car_mut(car).remove_car_call(floor);

        let travel = building.car(car).direction();
        let onward = travel.is_directional()
            && self.has_work_beyond(building, car, floor, travel);
        for dir in served_directions(travel, onward).into_iter().flatten() {
            let key = HallCall::new(floor, dir);
            if self.claim_board.get(&key) == Some(&Some(car)) {
                self.claim_board.remove(&key);
                building.clear_hall_call(floor, dir);
                log::debug!("{car} served claimed hall call {key}");
                break;
            }
        }
    }

    fn on_doors_closed(&mut self, building: &mut Building, car: CarId) {
        self.decide_next_action(building, car);
    }

    fn tick(&mut self, building: &mut Building) {
        for car_id in building.car_ids() {
            self.try_claim_calls(building, car_id);
            if building.car(car_id).state() == CarState::Idle {
                self.decide_next_action(building, car_id);
            }
        }
    }

    fn should_stop_at(&self, building: &Building, car: CarId, floor: u8) -> bool {
        if building.car(car).has_car_call_at(floor) {
            return true;
        }
        let dir = building.car(car).direction();
        self.claim(floor, dir) == Some(Some(car))
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
                .claim_board
                .iter()
                .any(|(key, &claim)| claim == Some(car) && beyond(key.floor))
    }
}
