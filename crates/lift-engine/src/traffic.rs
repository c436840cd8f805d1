//! Synthetic request traffic.
//!
//! A seeded producer that pushes valid random hall and car calls through an
//! [`EngineHandle`].  Boundary floors are coerced to their only legal
//! direction, so every generated request passes ingress validation and the
//! accepted count equals the request count.

use std::thread;
use std::time::Duration;

use lift_core::{CarId, Direction, SimRng};

use crate::EngineHandle;

/// Deterministic random request producer.
pub struct TrafficGenerator {
    handle: EngineHandle,
    rng: SimRng,
}

impl TrafficGenerator {
    pub fn new(handle: EngineHandle, rng: SimRng) -> Self {
        Self { handle, rng }
    }

    /// Issue `count` random requests, pausing `pause` between consecutive
    /// ones.  Returns how many were accepted.
    pub fn run(&mut self, count: usize, pause: Duration) -> usize {
        let mut accepted = 0;
        for i in 0..count {
            if self.issue_one() {
                accepted += 1;
            }
            if !pause.is_zero() && i + 1 < count {
                thread::sleep(pause);
            }
        }
        accepted
    }

    /// Consume the generator into a producer thread.
    pub fn spawn(mut self, count: usize, pause: Duration) -> thread::JoinHandle<usize> {
        thread::spawn(move || self.run(count, pause))
    }

    fn issue_one(&mut self) -> bool {
        let num_floors = self.handle.num_floors();
        let floor = self.rng.gen_range(1..=num_floors);

        // A one-floor building has no legal hall calls.
        let hall = num_floors > 1 && self.rng.gen_bool(0.5);
        if hall {
            let direction = if floor == 1 {
                Direction::Up
            } else if floor == num_floors {
                Direction::Down
            } else if self.rng.gen_bool(0.5) {
                Direction::Up
            } else {
                Direction::Down
            };
            self.handle.request_hall_call(floor, direction).is_ok()
        } else {
            let car = CarId(self.rng.gen_range(0..self.handle.num_elevators()));
            self.handle.request_car_call(car, floor).is_ok()
        }
    }
}
