//! The engine: a single consumer thread that owns the fleet.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use lift_core::{CarId, Direction, SimClock, SimConfig, Tick};
use lift_dispatch::Dispatcher;
use lift_events::{Event, EventQueue};
use lift_fleet::{Building, FleetSnapshot};

use crate::observer::{EngineObserver, NoopObserver};
use crate::{driver, RequestError};

/// State shared between the engine thread and its handles.
pub(crate) struct Shared {
    pub(crate) queue: Arc<EventQueue<Event>>,
    pub(crate) stop_flag: Arc<AtomicBool>,
    pub(crate) running: Arc<AtomicBool>,
    pub(crate) tick_counter: Arc<AtomicU64>,
    pub(crate) snapshot: Arc<Mutex<FleetSnapshot>>,
}

/// The simulation engine.
///
/// Owns the `Building`, the dispatcher, and the clock; everything mutable
/// happens on the thread that calls [`run`][Engine::run] (or the worker
/// thread created by [`spawn`][Engine::spawn]).  Producers hold
/// [`EngineHandle`]s.
///
/// Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct Engine {
    pub(crate) config: SimConfig,
    pub(crate) clock: SimClock,
    pub(crate) building: Building,
    pub(crate) dispatcher: Box<dyn Dispatcher>,
    pub(crate) shared: Shared,
}

impl Engine {
    /// A cloneable producer-facing handle: validated request ingress,
    /// read-only snapshots, cooperative stop.
    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            queue: Arc::clone(&self.shared.queue),
            stop_flag: Arc::clone(&self.shared.stop_flag),
            running: Arc::clone(&self.shared.running),
            tick_counter: Arc::clone(&self.shared.tick_counter),
            snapshot: Arc::clone(&self.shared.snapshot),
            num_floors: self.config.num_floors,
            num_elevators: self.config.num_elevators,
        }
    }

    /// The policy name ("master" or "distributed").
    pub fn dispatcher_name(&self) -> &'static str {
        self.dispatcher.name()
    }

    // ── Paced loop ────────────────────────────────────────────────────────

    /// Run until stopped, sleeping `tick_duration_ms` between ticks.
    ///
    /// Returns after [`EngineHandle::stop`] is called or a `Shutdown` event
    /// is drained.
    pub fn run<O: EngineObserver>(&mut self, observer: &mut O) {
        self.shared.running.store(true, Ordering::SeqCst);
        log::info!(
            "engine started: {} floors, {} cars, {} policy",
            self.config.num_floors,
            self.config.num_elevators,
            self.dispatcher.name()
        );

        while !self.shared.stop_flag.load(Ordering::SeqCst) {
            thread::sleep(self.clock.tick_duration());
            if self.shared.stop_flag.load(Ordering::SeqCst) {
                break;
            }
            self.process_tick(observer);
        }

        self.publish_snapshot();
        observer.on_stop(self.clock.current_tick);
        self.shared.running.store(false, Ordering::SeqCst);
        log::info!("engine stopped at {}", self.clock.current_tick);
    }

    // ── Driven clock (tests, demos) ───────────────────────────────────────

    /// Run exactly `n` ticks with no pacing sleep.
    pub fn run_ticks<O: EngineObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.process_tick(observer);
        }
    }

    /// One un-paced tick.
    pub fn step(&mut self) {
        self.process_tick(&mut NoopObserver);
    }

    // ── Worker thread ─────────────────────────────────────────────────────

    /// Consume the engine into a paced worker thread.
    pub fn spawn(self) -> EngineThread {
        self.spawn_with(NoopObserver)
    }

    /// Like [`spawn`][Engine::spawn] with a caller-supplied observer.
    pub fn spawn_with<O>(mut self, mut observer: O) -> EngineThread
    where
        O: EngineObserver + Send + 'static,
    {
        let handle = self.handle();
        let join = thread::spawn(move || {
            self.run(&mut observer);
            self
        });
        EngineThread { handle, join }
    }

    // ── Tick processing ───────────────────────────────────────────────────

    fn process_tick<O: EngineObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        // ── Phase 1: advance every car's state machine ────────────────────
        driver::advance_cars(
            &mut self.building,
            self.dispatcher.as_ref(),
            &self.shared.queue,
            self.config.door_open_ticks,
            self.config.floor_travel_ticks,
        );

        // ── Phase 2: per-tick dispatch (claim scan, idle re-dispatch) ─────
        self.dispatcher.tick(&mut self.building);

        // ── Phase 3: drain the queue, routing each event ──────────────────
        let mut events_processed = 0;
        while let Some(event) = self.shared.queue.try_pop() {
            observer.on_event(now, &event);
            self.route_event(event);
            events_processed += 1;
        }

        // ── Phase 4: advance the clock, publish the snapshot ──────────────
        self.clock.advance();
        self.shared
            .tick_counter
            .store(self.clock.current_tick.0, Ordering::SeqCst);
        self.publish_snapshot();

        observer.on_tick_end(now, events_processed);
    }

    /// Route one drained event to the dispatcher (or the engine itself).
    ///
    /// External event payloads are re-checked here so a malformed event can
    /// never index out of range; the ingress validation makes rejections
    /// user-visible long before this point.
    fn route_event(&mut self, event: Event) {
        log::debug!("{} event {event:?}", self.clock.current_tick);
        match event {
            Event::HallCall { floor, direction } => {
                if !self.building.is_valid_floor(floor) || !direction.is_directional() {
                    log::warn!("dropping malformed hall call {event:?}");
                    return;
                }
                self.dispatcher
                    .handle_hall_call(&mut self.building, floor, direction);
            }
            Event::CarCall { car, floor } => {
                if !self.building.is_valid_car(car) || !self.building.is_valid_floor(floor) {
                    log::warn!("dropping malformed car call {event:?}");
                    return;
                }
                self.dispatcher
                    .handle_car_call(&mut self.building, car, floor);
            }
            Event::ElevatorArrived { car, floor } => {
                self.dispatcher
                    .on_elevator_arrived(&mut self.building, car, floor);
            }
            Event::DoorsOpened { car, floor } => {
                self.dispatcher
                    .on_doors_opened(&mut self.building, car, floor);
            }
            Event::DoorsClosed { car } => {
                self.dispatcher.on_doors_closed(&mut self.building, car);
            }
            Event::Shutdown => {
                self.shared.stop_flag.store(true, Ordering::SeqCst);
            }
            Event::Tick => {}
        }
    }

    fn publish_snapshot(&self) {
        let snapshot = self.building.snapshot(self.clock.current_tick);
        *self.shared.snapshot.lock().unwrap() = snapshot;
    }
}

// ── EngineThread ──────────────────────────────────────────────────────────────

/// A running engine worker thread.
pub struct EngineThread {
    handle: EngineHandle,
    join: thread::JoinHandle<Engine>,
}

impl EngineThread {
    pub fn handle(&self) -> &EngineHandle {
        &self.handle
    }

    /// Wait for the engine loop to exit and get the engine back.
    ///
    /// Call [`EngineHandle::stop`] first (or rely on a drained `Shutdown`
    /// event); joining a running engine blocks indefinitely.
    pub fn join(self) -> thread::Result<Engine> {
        self.join.join()
    }

    /// Convenience: stop, then join.
    pub fn stop_and_join(self) -> thread::Result<Engine> {
        self.handle.stop();
        self.join.join()
    }
}

// ── EngineHandle ──────────────────────────────────────────────────────────────

/// Cloneable producer-facing handle to a (possibly running) engine.
///
/// All methods are safe to call from any thread at any time.
#[derive(Clone)]
pub struct EngineHandle {
    queue: Arc<EventQueue<Event>>,
    stop_flag: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
    tick_counter: Arc<AtomicU64>,
    snapshot: Arc<Mutex<FleetSnapshot>>,
    num_floors: u8,
    num_elevators: u8,
}

impl EngineHandle {
    #[inline]
    pub fn num_floors(&self) -> u8 {
        self.num_floors
    }

    #[inline]
    pub fn num_elevators(&self) -> u8 {
        self.num_elevators
    }

    // ── Inbound requests ──────────────────────────────────────────────────

    /// Press a landing button.
    ///
    /// Rejects out-of-range floors, directionless calls, and the impossible
    /// boundary combinations (down from floor 1, up from the top floor).
    pub fn request_hall_call(&self, floor: u8, direction: Direction) -> Result<(), RequestError> {
        if !(1..=self.num_floors).contains(&floor) {
            let err = RequestError::FloorOutOfRange {
                floor,
                num_floors: self.num_floors,
            };
            log::warn!("rejected hall call: {err}");
            return Err(err);
        }
        if !direction.is_directional() {
            let err = RequestError::DirectionlessHallCall;
            log::warn!("rejected hall call: {err}");
            return Err(err);
        }
        if (floor == 1 && direction == Direction::Down)
            || (floor == self.num_floors && direction == Direction::Up)
        {
            let err = RequestError::ImpossibleDirection { floor, direction };
            log::warn!("rejected hall call: {err}");
            return Err(err);
        }

        self.queue.push(Event::HallCall { floor, direction });
        Ok(())
    }

    /// Press an in-cabin destination button.
    pub fn request_car_call(&self, car: CarId, floor: u8) -> Result<(), RequestError> {
        if car.index() >= self.num_elevators as usize {
            let err = RequestError::CarOutOfRange {
                car,
                num_elevators: self.num_elevators,
            };
            log::warn!("rejected car call: {err}");
            return Err(err);
        }
        if !(1..=self.num_floors).contains(&floor) {
            let err = RequestError::FloorOutOfRange {
                floor,
                num_floors: self.num_floors,
            };
            log::warn!("rejected car call: {err}");
            return Err(err);
        }

        self.queue.push(Event::CarCall { car, floor });
        Ok(())
    }

    /// Request a graceful stop through the event stream itself: the engine
    /// finishes the tick that drains the event, then exits.
    pub fn request_shutdown(&self) {
        self.queue.push(Event::Shutdown);
    }

    // ── Outbound inspection ───────────────────────────────────────────────

    /// The fleet snapshot published at the last tick boundary.
    pub fn snapshot(&self) -> FleetSnapshot {
        self.snapshot.lock().unwrap().clone()
    }

    /// Completed tick count.
    pub fn current_tick(&self) -> Tick {
        Tick(self.tick_counter.load(Ordering::SeqCst))
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Cooperative stop: the loop observes the flag on its next iteration.
    /// Idempotent.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        self.queue.shutdown();
    }
}
