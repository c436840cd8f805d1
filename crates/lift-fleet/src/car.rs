//! Per-car state: position, direction, lifecycle state, calls, passengers.

use std::collections::BTreeSet;

use lift_core::{CarId, CarState, Direction};

use crate::snapshot::CarSnapshot;

/// One elevator car.
///
/// Mutators keep the state-machine invariants:
/// - `Idle` ⇒ `direction == Idle` and `ticks_remaining == 0`
/// - `Moving` ⇒ `direction` is `Up` or `Down`
/// - door states ⇒ the car is stationary at `current_floor`
///
/// The state-machine driver is authoritative for `current_floor`: only
/// [`arrive_at`][Car::arrive_at] moves a car.
#[derive(Clone, Debug)]
pub struct Car {
    id: CarId,
    current_floor: u8,
    direction: Direction,
    state: CarState,
    /// Destination floors, unique and ordered for range queries.
    car_calls: BTreeSet<u8>,
    passenger_count: u8,
    capacity: u8,
    /// Timer for the active timed state; 0 when `Idle`.
    ticks_remaining: u32,
}

impl Car {
    pub fn new(id: CarId, capacity: u8, start_floor: u8) -> Self {
        Self {
            id,
            current_floor: start_floor,
            direction: Direction::Idle,
            state: CarState::Idle,
            car_calls: BTreeSet::new(),
            passenger_count: 0,
            capacity,
            ticks_remaining: 0,
        }
    }

    // ── Getters ───────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> CarId {
        self.id
    }

    #[inline]
    pub fn current_floor(&self) -> u8 {
        self.current_floor
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn state(&self) -> CarState {
        self.state
    }

    #[inline]
    pub fn passenger_count(&self) -> u8 {
        self.passenger_count
    }

    #[inline]
    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    #[inline]
    pub fn ticks_remaining(&self) -> u32 {
        self.ticks_remaining
    }

    // ── Car-call management ───────────────────────────────────────────────

    /// Add a destination floor.  Idempotent.
    pub fn add_car_call(&mut self, floor: u8) {
        self.car_calls.insert(floor);
    }

    pub fn remove_car_call(&mut self, floor: u8) {
        self.car_calls.remove(&floor);
    }

    #[inline]
    pub fn has_car_call_at(&self, floor: u8) -> bool {
        self.car_calls.contains(&floor)
    }

    #[inline]
    pub fn has_any_car_calls(&self) -> bool {
        !self.car_calls.is_empty()
    }

    pub fn car_calls(&self) -> &BTreeSet<u8> {
        &self.car_calls
    }

    /// Any car call strictly above the current floor?
    pub fn has_calls_above(&self) -> bool {
        self.car_calls
            .range(self.current_floor + 1..)
            .next()
            .is_some()
    }

    /// Any car call strictly below the current floor?
    pub fn has_calls_below(&self) -> bool {
        self.car_calls.range(..self.current_floor).next().is_some()
    }

    // ── State transitions ─────────────────────────────────────────────────

    /// Begin (or continue) a single-floor transit.
    pub fn start_moving(&mut self, direction: Direction, ticks_to_arrive: u32) {
        debug_assert!(direction.is_directional(), "a moving car needs a direction");
        self.direction = direction;
        self.state = CarState::Moving;
        self.ticks_remaining = ticks_to_arrive;
    }

    /// Count down the active timed state.  Saturates at zero.
    pub fn decrement_tick(&mut self) {
        if self.ticks_remaining > 0 {
            self.ticks_remaining -= 1;
        }
    }

    /// Record arrival at `floor`.  Only the driver calls this; the follow-up
    /// (open doors or continue moving) is a separate transition.
    pub fn arrive_at(&mut self, floor: u8) {
        self.current_floor = floor;
    }

    pub fn open_doors(&mut self, ticks_to_open: u32) {
        self.state = CarState::DoorsOpening;
        self.ticks_remaining = ticks_to_open;
    }

    pub fn set_doors_open(&mut self, ticks_open: u32) {
        self.state = CarState::DoorsOpen;
        self.ticks_remaining = ticks_open;
    }

    pub fn close_doors(&mut self, ticks_to_close: u32) {
        self.state = CarState::DoorsClosing;
        self.ticks_remaining = ticks_to_close;
    }

    pub fn set_idle(&mut self) {
        self.state = CarState::Idle;
        self.direction = Direction::Idle;
        self.ticks_remaining = 0;
    }

    // ── Dispatch cost ─────────────────────────────────────────────────────

    /// Cost for this car to serve a hall call at `(floor, dir)`.
    ///
    /// Idle cars bid their distance.  A car already moving the same way with
    /// the call ahead of it also bids its distance; any other busy car pays a
    /// `2 * num_floors` directional-reverse penalty on top.
    pub fn cost_to_serve(&self, floor: u8, dir: Direction, num_floors: u8) -> u32 {
        let distance = self.current_floor.abs_diff(floor) as u32;

        if self.state == CarState::Idle {
            return distance;
        }

        let same_direction = self.direction == dir;
        let on_the_way = (self.direction == Direction::Up && floor > self.current_floor)
            || (self.direction == Direction::Down && floor < self.current_floor);

        if same_direction && on_the_way {
            distance
        } else {
            distance + 2 * num_floors as u32
        }
    }

    // ── Passengers ────────────────────────────────────────────────────────

    #[inline]
    pub fn can_board(&self) -> bool {
        self.passenger_count < self.capacity
    }

    /// Board one passenger; saturates at `capacity`.
    pub fn board_passenger(&mut self) {
        if self.passenger_count < self.capacity {
            self.passenger_count += 1;
        }
    }

    /// Alight one passenger; saturates at zero.
    pub fn alight_passenger(&mut self) {
        if self.passenger_count > 0 {
            self.passenger_count -= 1;
        }
    }

    // ── Snapshot ──────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> CarSnapshot {
        CarSnapshot {
            id: self.id,
            floor: self.current_floor,
            state: self.state,
            direction: self.direction,
            passenger_count: self.passenger_count,
            car_calls: self.car_calls.iter().copied().collect(),
        }
    }
}
