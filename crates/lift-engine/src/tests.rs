//! Integration tests for the engine: scenario playback, progress, invariants,
//! lifecycle, and concurrent producers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use lift_core::{CarId, CarState, ControllerKind, Direction, SimConfig, SimRng, Tick};
use lift_events::Event;
use lift_fleet::FleetSnapshot;

use crate::{Engine, EngineBuilder, EngineHandle, EngineObserver, NoopObserver, TrafficGenerator};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(controller: ControllerKind) -> SimConfig {
    SimConfig {
        num_floors: 10,
        num_elevators: 3,
        tick_duration_ms: 100,
        controller,
        ..SimConfig::default()
    }
}

fn build(config: SimConfig) -> Engine {
    EngineBuilder::new(config).build().unwrap()
}

/// Panics if any universal fleet invariant is violated in `snapshot`.
fn assert_invariants(snapshot: &FleetSnapshot, config: &SimConfig) {
    for car in &snapshot.cars {
        assert!(
            (1..=config.num_floors).contains(&car.floor),
            "{} at floor {} outside the building",
            car.id,
            car.floor
        );
        assert!(
            car.passenger_count <= config.capacity,
            "{} over capacity",
            car.id
        );
        if car.state == CarState::Idle {
            assert_eq!(car.direction, Direction::Idle, "{} idle with a direction", car.id);
        }
        if car.state == CarState::Moving {
            assert!(car.direction.is_directional(), "{} moving without direction", car.id);
        }
    }
    for call in &snapshot.hall_calls {
        assert!(
            !(call.floor == 1 && call.direction == Direction::Down),
            "down request on floor 1"
        );
        assert!(
            !(call.floor == config.num_floors && call.direction == Direction::Up),
            "up request on the top floor"
        );
    }
}

/// Observer that checks invariants against the published snapshot at every
/// tick boundary.
struct InvariantChecker {
    handle: EngineHandle,
    config: SimConfig,
    ticks_seen: u64,
}

impl EngineObserver for InvariantChecker {
    fn on_tick_end(&mut self, _tick: Tick, _events: usize) {
        assert_invariants(&self.handle.snapshot(), &self.config);
        self.ticks_seen += 1;
    }
}

// ── Scenario A: single car, single call ───────────────────────────────────────

#[cfg(test)]
mod scenario_single_call {
    use super::*;

    fn scenario_engine() -> Engine {
        build(SimConfig {
            num_floors: 5,
            num_elevators: 1,
            capacity: 6,
            door_open_ticks: 3,
            floor_travel_ticks: 2,
            tick_duration_ms: 100,
            controller: ControllerKind::Master,
            ..SimConfig::default()
        })
    }

    #[test]
    fn hall_call_is_served_with_exact_timing() {
        let mut engine = scenario_engine();
        let handle = engine.handle();
        handle.request_hall_call(3, Direction::Up).unwrap();

        // Tick 1: the call is drained, assigned, and the car starts moving.
        engine.run_ticks(1, &mut NoopObserver);
        let snap = handle.snapshot();
        assert_eq!(snap.car(CarId(0)).state, CarState::Moving);
        assert_eq!(snap.car(CarId(0)).direction, Direction::Up);
        assert_eq!(snap.car(CarId(0)).floor, 1);

        // Tick 3: one floor travelled (2 ticks/floor); floor 2 is nobody's
        // destination, so the car flies by without opening its doors.
        engine.run_ticks(2, &mut NoopObserver);
        let snap = handle.snapshot();
        assert_eq!(snap.car(CarId(0)).floor, 2);
        assert_eq!(snap.car(CarId(0)).state, CarState::Moving);

        // Tick 5: arrival at floor 3; doors opening; landing cleared.
        engine.run_ticks(2, &mut NoopObserver);
        let snap = handle.snapshot();
        assert_eq!(snap.car(CarId(0)).floor, 3);
        assert_eq!(snap.car(CarId(0)).state, CarState::DoorsOpening);
        assert!(snap.hall_calls.is_empty(), "up button at 3 cleared on arrival");

        // Tick 8: doors open (3 opening ticks elapsed).
        engine.run_ticks(3, &mut NoopObserver);
        assert_eq!(handle.snapshot().car(CarId(0)).state, CarState::DoorsOpen);

        // Tick 11: dwell over, doors closing; tick 12: idle, nothing left.
        engine.run_ticks(3, &mut NoopObserver);
        assert_eq!(handle.snapshot().car(CarId(0)).state, CarState::DoorsClosing);
        engine.run_ticks(1, &mut NoopObserver);
        let snap = handle.snapshot();
        assert_eq!(snap.car(CarId(0)).state, CarState::Idle);
        assert_eq!(snap.car(CarId(0)).direction, Direction::Idle);
        assert_eq!(handle.current_tick(), Tick(12));
    }
}

// ── Car-call idempotence (scenario E) ─────────────────────────────────────────

#[cfg(test)]
mod idempotence {
    use super::*;

    #[test]
    fn repeated_car_call_registers_once() {
        let mut engine = build(config(ControllerKind::Master));
        let handle = engine.handle();
        for _ in 0..3 {
            handle.request_car_call(CarId(0), 4).unwrap();
        }
        engine.run_ticks(1, &mut NoopObserver);
        assert_eq!(handle.snapshot().car(CarId(0)).car_calls, vec![4]);
    }
}

// ── Ingress validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod ingress {
    use super::*;
    use crate::RequestError;

    #[test]
    fn rejects_out_of_range_and_boundary_requests() {
        let engine = build(config(ControllerKind::Master));
        let handle = engine.handle();

        assert_eq!(
            handle.request_hall_call(0, Direction::Up),
            Err(RequestError::FloorOutOfRange { floor: 0, num_floors: 10 })
        );
        assert_eq!(
            handle.request_hall_call(11, Direction::Up),
            Err(RequestError::FloorOutOfRange { floor: 11, num_floors: 10 })
        );
        assert_eq!(
            handle.request_hall_call(4, Direction::Idle),
            Err(RequestError::DirectionlessHallCall)
        );
        assert_eq!(
            handle.request_hall_call(1, Direction::Down),
            Err(RequestError::ImpossibleDirection { floor: 1, direction: Direction::Down })
        );
        assert_eq!(
            handle.request_hall_call(10, Direction::Up),
            Err(RequestError::ImpossibleDirection { floor: 10, direction: Direction::Up })
        );
        assert_eq!(
            handle.request_car_call(CarId(3), 4),
            Err(RequestError::CarOutOfRange { car: CarId(3), num_elevators: 3 })
        );
        assert_eq!(
            handle.request_car_call(CarId(0), 0),
            Err(RequestError::FloorOutOfRange { floor: 0, num_floors: 10 })
        );

        handle.request_hall_call(1, Direction::Up).unwrap();
        handle.request_hall_call(10, Direction::Down).unwrap();
        handle.request_car_call(CarId(2), 10).unwrap();
    }

    #[test]
    fn rejected_requests_never_reach_the_fleet() {
        let mut engine = build(config(ControllerKind::Master));
        let handle = engine.handle();
        let _ = handle.request_hall_call(1, Direction::Down);
        let _ = handle.request_hall_call(42, Direction::Up);
        engine.run_ticks(2, &mut NoopObserver);

        let snap = handle.snapshot();
        assert!(snap.hall_calls.is_empty());
        assert!(snap.cars.iter().all(|c| c.state == CarState::Idle));
    }
}

// ── Progress ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod progress {
    use super::*;

    /// Run until the fleet is fully quiescent; panic after `limit` ticks.
    fn run_until_quiescent(engine: &mut Engine, handle: &EngineHandle, limit: u64) -> u64 {
        for elapsed in 0..limit {
            let snap = handle.snapshot();
            let served = snap.hall_calls.is_empty()
                && snap
                    .cars
                    .iter()
                    .all(|c| c.car_calls.is_empty() && c.state == CarState::Idle);
            if served {
                return elapsed;
            }
            engine.run_ticks(1, &mut NoopObserver);
        }
        panic!("fleet not quiescent within {limit} ticks");
    }

    #[test]
    fn accepted_call_moves_a_car_within_one_tick() {
        let mut engine = build(config(ControllerKind::Master));
        let handle = engine.handle();
        handle.request_car_call(CarId(0), 7).unwrap();
        engine.step();
        assert_ne!(handle.snapshot().car(CarId(0)).state, CarState::Idle);
    }

    #[test]
    fn static_call_set_is_fully_served() {
        for controller in [ControllerKind::Master, ControllerKind::Distributed] {
            let mut engine = build(config(controller));
            let handle = engine.handle();
            handle.request_hall_call(5, Direction::Up).unwrap();
            handle.request_hall_call(9, Direction::Down).unwrap();
            handle.request_car_call(CarId(0), 2).unwrap();
            handle.request_car_call(CarId(2), 8).unwrap();

            run_until_quiescent(&mut engine, &handle, 300);
        }
    }

    #[test]
    fn call_approached_from_the_far_side_is_served() {
        // A single car below an up-call reaches it travelling up; a single
        // car below a down-call reaches it travelling up too — the landing
        // must still be cleared when the stop ends the run.
        for controller in [ControllerKind::Master, ControllerKind::Distributed] {
            let mut engine = build(SimConfig {
                num_elevators: 1,
                ..config(controller)
            });
            let handle = engine.handle();
            handle.request_hall_call(5, Direction::Down).unwrap();
            run_until_quiescent(&mut engine, &handle, 300);
        }
    }
}

// ── Invariants under load ─────────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use super::*;

    #[test]
    fn hold_at_every_tick_boundary_under_random_traffic() {
        for controller in [ControllerKind::Master, ControllerKind::Distributed] {
            let cfg = config(controller);
            let mut engine = build(cfg.clone());
            let handle = engine.handle();
            let mut checker = InvariantChecker {
                handle: engine.handle(),
                config: cfg,
                ticks_seen: 0,
            };

            let mut traffic = TrafficGenerator::new(handle, SimRng::new(11));
            for _ in 0..40 {
                traffic.run(2, Duration::ZERO);
                engine.run_ticks(5, &mut checker);
            }
            engine.run_ticks(100, &mut checker);
            assert_eq!(checker.ticks_seen, 40 * 5 + 100);
        }
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use super::*;

    #[test]
    fn spawn_stop_join() {
        let engine = build(config(ControllerKind::Master));
        let worker = engine.spawn();
        thread::sleep(Duration::from_millis(250));
        assert!(worker.handle().is_running());

        let handle = worker.handle().clone();
        let engine = worker.stop_and_join().unwrap();
        assert!(!handle.is_running());
        assert!(handle.current_tick() >= Tick(1), "paced loop ticked");
        assert_eq!(engine.dispatcher_name(), "master");
    }

    #[test]
    fn stop_before_loop_starts_is_immediate() {
        let mut engine = build(config(ControllerKind::Master));
        let handle = engine.handle();
        handle.stop();
        engine.run(&mut NoopObserver);
        assert_eq!(handle.current_tick(), Tick(0));
    }

    #[test]
    fn shutdown_event_ends_the_loop() {
        let engine = build(config(ControllerKind::Distributed));
        let worker = engine.spawn();
        worker.handle().request_shutdown();
        let engine = worker.join().unwrap();
        assert!(engine.shared.queue.is_empty());
    }

    #[test]
    fn rapid_start_stop() {
        for _ in 0..3 {
            let engine = build(SimConfig {
                num_floors: 5,
                num_elevators: 2,
                ..config(ControllerKind::Master)
            });
            let worker = engine.spawn();
            worker.handle().request_hall_call(3, Direction::Up).unwrap();
            thread::sleep(Duration::from_millis(30));
            worker.stop_and_join().unwrap();
        }
    }

    #[test]
    fn invalid_config_fails_to_build() {
        let result = EngineBuilder::new(SimConfig {
            num_floors: 13,
            ..SimConfig::default()
        })
        .build();
        assert!(result.is_err());
    }
}

// ── Concurrent producers (scenario F) ─────────────────────────────────────────

#[cfg(test)]
mod concurrent_producers {
    use super::*;

    const PRODUCERS: usize = 4;
    const PER_PRODUCER: usize = 25;

    /// Deterministic request pattern for producer `t` — all requests valid.
    fn requests_for(t: usize) -> Vec<Event> {
        (0..PER_PRODUCER)
            .map(|i| {
                let floor = ((t * 7 + i * 3) % 10) as u8 + 1;
                if i % 2 == 0 {
                    let direction = match floor {
                        1 => Direction::Up,
                        10 => Direction::Down,
                        f if f <= 5 => Direction::Up,
                        _ => Direction::Down,
                    };
                    Event::HallCall { floor, direction }
                } else {
                    Event::CarCall {
                        car: CarId(((t + i) % 3) as u8),
                        floor,
                    }
                }
            })
            .collect()
    }

    struct EventRecorder(Arc<Mutex<Vec<Event>>>);

    impl EngineObserver for EventRecorder {
        fn on_event(&mut self, _tick: Tick, event: &Event) {
            self.0.lock().unwrap().push(*event);
        }
    }

    #[test]
    fn all_requests_appear_in_the_event_log_exactly_once() {
        let engine = build(config(ControllerKind::Master));
        let log = Arc::new(Mutex::new(Vec::new()));
        let worker = engine.spawn_with(EventRecorder(Arc::clone(&log)));

        let producers: Vec<_> = (0..PRODUCERS)
            .map(|t| {
                let handle = worker.handle().clone();
                thread::spawn(move || {
                    for request in requests_for(t) {
                        match request {
                            Event::HallCall { floor, direction } => {
                                handle.request_hall_call(floor, direction).unwrap();
                            }
                            Event::CarCall { car, floor } => {
                                handle.request_car_call(car, floor).unwrap();
                            }
                            _ => unreachable!(),
                        }
                        thread::sleep(Duration::from_millis(5));
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }

        // Let the engine drain everything still queued, then stop.
        thread::sleep(Duration::from_millis(600));
        worker.stop_and_join().unwrap();

        let mut expected: HashMap<Event, usize> = HashMap::new();
        for t in 0..PRODUCERS {
            for request in requests_for(t) {
                *expected.entry(request).or_default() += 1;
            }
        }
        let mut observed: HashMap<Event, usize> = HashMap::new();
        for event in log.lock().unwrap().iter() {
            if matches!(event, Event::HallCall { .. } | Event::CarCall { .. }) {
                *observed.entry(*event).or_default() += 1;
            }
        }

        assert_eq!(
            observed.values().sum::<usize>(),
            PRODUCERS * PER_PRODUCER,
            "no request lost or duplicated"
        );
        assert_eq!(observed, expected);
    }
}

// ── Traffic generator ─────────────────────────────────────────────────────────

#[cfg(test)]
mod traffic {
    use super::*;

    #[test]
    fn generated_requests_are_always_accepted() {
        let mut engine = build(SimConfig {
            num_floors: 5,
            num_elevators: 2,
            ..config(ControllerKind::Master)
        });
        let mut traffic = TrafficGenerator::new(engine.handle(), SimRng::new(7));
        assert_eq!(traffic.run(50, Duration::ZERO), 50);

        let handle = engine.handle();
        let cfg = engine.config.clone();
        for _ in 0..1500 {
            engine.run_ticks(1, &mut NoopObserver);
            let snap = handle.snapshot();
            assert_invariants(&snap, &cfg);
            if snap.hall_calls.is_empty()
                && snap
                    .cars
                    .iter()
                    .all(|c| c.car_calls.is_empty() && c.state == CarState::Idle)
            {
                return;
            }
        }
        panic!("random workload not fully served");
    }

    #[test]
    fn same_seed_produces_identical_runs() {
        let run = || {
            let mut engine = build(config(ControllerKind::Distributed));
            let mut traffic = TrafficGenerator::new(engine.handle(), SimRng::new(99));
            traffic.run(30, Duration::ZERO);
            engine.run_ticks(50, &mut NoopObserver);
            engine.handle().snapshot()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn one_floor_building_gets_car_calls_only() {
        let mut engine = build(SimConfig {
            num_floors: 1,
            num_elevators: 1,
            ..config(ControllerKind::Master)
        });
        let mut traffic = TrafficGenerator::new(engine.handle(), SimRng::new(3));
        assert_eq!(traffic.run(10, Duration::ZERO), 10);

        engine.run_ticks(30, &mut NoopObserver);
        let snap = engine.handle().snapshot();
        assert!(snap.hall_calls.is_empty());
        assert_eq!(snap.car(CarId(0)).floor, 1);
    }
}
