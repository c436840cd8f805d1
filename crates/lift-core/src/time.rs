//! Simulation time model and run configuration.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter; every duration in the
//! simulator (door dwell, single-floor transit) is an integer tick count, so
//! all timing arithmetic is exact.  The mapping to wall-clock time is held in
//! `SimClock`: the engine sleeps `tick_duration_ms` between iterations when
//! pacing in real time, and skips the sleep entirely under a driven clock
//! (tests).

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::{LiftError, LiftResult};

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Hard upper bound on `num_floors`, enforced at construction.
pub const MAX_FLOORS: u8 = 12;
/// Hard upper bound on `num_elevators`.
pub const MAX_ELEVATORS: u8 = 3;
/// Hard upper bound on per-car `capacity`.
pub const MAX_CAPACITY: u8 = 10;
/// Accepted range for `tick_duration_ms`.
pub const TICK_DURATION_RANGE_MS: std::ops::RangeInclusive<u32> = 100..=2000;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Monotonic tick counter with a wall-clock pacing interval.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many real milliseconds one tick represents when pacing.
    pub tick_duration_ms: u32,
    /// The current tick — advanced once per engine iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_ms: u32) -> Self {
        Self {
            tick_duration_ms,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// The real-time pacing interval.
    #[inline]
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_duration_ms as u64)
    }

    /// Elapsed simulated milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_duration_ms as u64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} ms elapsed)", self.current_tick, self.elapsed_ms())
    }
}

// ── ControllerKind ────────────────────────────────────────────────────────────

/// Which group-dispatch policy the engine is built with.  No hot-swap: the
/// choice is fixed at construction.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControllerKind {
    /// Centralized assigner: one table maps each hall call to one car.
    #[default]
    Master,
    /// Decentralized claim board: cars claim landings themselves.
    Distributed,
}

impl fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerKind::Master => f.write_str("master"),
            ControllerKind::Distributed => f.write_str("distributed"),
        }
    }
}

impl FromStr for ControllerKind {
    type Err = LiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "master" => Ok(ControllerKind::Master),
            "distributed" => Ok(ControllerKind::Distributed),
            other => Err(LiftError::Parse(format!(
                "unknown controller kind {other:?} (expected \"master\" or \"distributed\")"
            ))),
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration, immutable after engine construction.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Floors are numbered `1..=num_floors`.
    pub num_floors: u8,

    /// Cars are numbered `0..num_elevators`.
    pub num_elevators: u8,

    /// Per-car passenger capacity.
    pub capacity: u8,

    /// Real milliseconds per tick when the engine paces itself.
    pub tick_duration_ms: u32,

    /// Ticks the doors spend opening, and again dwelling open.
    /// Closing is pinned at one tick.
    pub door_open_ticks: u32,

    /// Ticks for a single-floor transit.  Multi-floor moves are a sequence
    /// of single-floor transits.
    pub floor_travel_ticks: u32,

    /// Which dispatch policy to construct.
    pub controller: ControllerKind,

    /// RNG seed for synthetic traffic.  The same seed always produces the
    /// same request stream.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_floors: 10,
            num_elevators: 3,
            capacity: 6,
            tick_duration_ms: 500,
            door_open_ticks: 3,
            floor_travel_ticks: 2,
            controller: ControllerKind::Master,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Check every configuration bound.  Called once at engine construction;
    /// a validated config cannot produce an out-of-range floor or car id
    /// internally.
    pub fn validate(&self) -> LiftResult<()> {
        if self.num_floors < 1 || self.num_floors > MAX_FLOORS {
            return Err(LiftError::Config(format!(
                "num_floors must be 1..={MAX_FLOORS}, got {}",
                self.num_floors
            )));
        }
        if self.num_elevators < 1 || self.num_elevators > MAX_ELEVATORS {
            return Err(LiftError::Config(format!(
                "num_elevators must be 1..={MAX_ELEVATORS}, got {}",
                self.num_elevators
            )));
        }
        if self.capacity < 1 || self.capacity > MAX_CAPACITY {
            return Err(LiftError::Config(format!(
                "capacity must be 1..={MAX_CAPACITY}, got {}",
                self.capacity
            )));
        }
        if !TICK_DURATION_RANGE_MS.contains(&self.tick_duration_ms) {
            return Err(LiftError::Config(format!(
                "tick_duration_ms must be {}..={} ms, got {}",
                TICK_DURATION_RANGE_MS.start(),
                TICK_DURATION_RANGE_MS.end(),
                self.tick_duration_ms
            )));
        }
        if self.door_open_ticks == 0 {
            return Err(LiftError::Config("door_open_ticks must be positive".into()));
        }
        if self.floor_travel_ticks == 0 {
            return Err(LiftError::Config(
                "floor_travel_ticks must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_ms)
    }
}
