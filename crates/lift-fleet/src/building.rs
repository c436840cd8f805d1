//! The building: fixed vectors of floors and cars.

use lift_core::{CarId, Direction, HallCall, SimConfig, Tick};

use crate::{Car, CarSnapshot, Floor, FleetSnapshot};

/// Owns the fleet.  Exclusive ownership: the engine thread holds the only
/// writable handle, and every other component sees published snapshots.
pub struct Building {
    num_floors: u8,
    floors: Vec<Floor>,
    cars: Vec<Car>,
}

impl Building {
    /// Build floors `1..=num_floors` and cars `0..num_elevators`, all cars
    /// idle at floor 1.
    pub fn new(config: &SimConfig) -> Self {
        let floors = (1..=config.num_floors).map(Floor::new).collect();
        let cars = (0..config.num_elevators)
            .map(|i| Car::new(CarId(i), config.capacity, 1))
            .collect();
        Self {
            num_floors: config.num_floors,
            floors,
            cars,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn num_floors(&self) -> u8 {
        self.num_floors
    }

    #[inline]
    pub fn num_cars(&self) -> u8 {
        self.cars.len() as u8
    }

    /// All car ids in ascending order.
    pub fn car_ids(&self) -> impl Iterator<Item = CarId> {
        (0..self.num_cars()).map(CarId)
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// # Panics
    /// On an invalid id — validated input never reaches this.
    pub fn car(&self, id: CarId) -> &Car {
        &self.cars[id.index()]
    }

    pub fn car_mut(&mut self, id: CarId) -> &mut Car {
        &mut self.cars[id.index()]
    }

    /// # Panics
    /// On an invalid floor number (floors are 1-indexed).
    pub fn floor(&self, number: u8) -> &Floor {
        assert!(self.is_valid_floor(number), "invalid floor {number}");
        &self.floors[number as usize - 1]
    }

    pub fn floor_mut(&mut self, number: u8) -> &mut Floor {
        assert!(self.is_valid_floor(number), "invalid floor {number}");
        &mut self.floors[number as usize - 1]
    }

    // ── Hall-call flags ───────────────────────────────────────────────────

    /// Light the landing button for `(floor, dir)`.
    ///
    /// Boundary-invalid combinations (down at floor 1, up at the top floor)
    /// and directionless calls are ignored, keeping the floor invariants
    /// intact no matter what a caller feeds in.
    pub fn register_hall_call(&mut self, floor: u8, dir: Direction) {
        if !self.is_valid_floor(floor) {
            return;
        }
        let top = self.num_floors;
        match dir {
            Direction::Up if floor < top => self.floor_mut(floor).press_up(),
            Direction::Down if floor > 1 => self.floor_mut(floor).press_down(),
            _ => {}
        }
    }

    pub fn clear_hall_call(&mut self, floor: u8, dir: Direction) {
        if !self.is_valid_floor(floor) {
            return;
        }
        match dir {
            Direction::Up => self.floor_mut(floor).clear_up(),
            Direction::Down => self.floor_mut(floor).clear_down(),
            Direction::Idle => {}
        }
    }

    pub fn has_hall_call(&self, floor: u8, dir: Direction) -> bool {
        if !self.is_valid_floor(floor) {
            return false;
        }
        match dir {
            Direction::Up => self.floor(floor).is_up_requested(),
            Direction::Down => self.floor(floor).is_down_requested(),
            Direction::Idle => false,
        }
    }

    /// All pressed landing buttons, ascending by floor, `Up` before `Down`.
    pub fn pressed_hall_calls(&self) -> Vec<HallCall> {
        let mut calls = Vec::new();
        for floor in &self.floors {
            if floor.is_up_requested() {
                calls.push(HallCall::new(floor.number(), Direction::Up));
            }
            if floor.is_down_requested() {
                calls.push(HallCall::new(floor.number(), Direction::Down));
            }
        }
        calls
    }

    /// Is any landing button pressed anywhere?
    pub fn any_hall_calls(&self) -> bool {
        self.floors
            .iter()
            .any(|f| f.is_up_requested() || f.is_down_requested())
    }

    // ── Validation ────────────────────────────────────────────────────────

    #[inline]
    pub fn is_valid_floor(&self, floor: u8) -> bool {
        (1..=self.num_floors).contains(&floor)
    }

    #[inline]
    pub fn is_valid_car(&self, id: CarId) -> bool {
        id.index() < self.cars.len()
    }

    // ── Snapshot ──────────────────────────────────────────────────────────

    /// Read-only view of the whole fleet at `tick`.
    pub fn snapshot(&self, tick: Tick) -> FleetSnapshot {
        let cars: Vec<CarSnapshot> = self.cars.iter().map(Car::snapshot).collect();
        FleetSnapshot {
            tick,
            cars,
            hall_calls: self.pressed_hall_calls(),
        }
    }
}
