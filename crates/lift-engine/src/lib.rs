//! `lift-engine` — tick loop orchestrator for the lift simulator.
//!
//! # The tick loop
//!
//! ```text
//! loop:
//!   ① Pace     — sleep tick_duration_ms (skipped under a driven clock).
//!   ② Advance  — run every car's motion/door state machine one tick;
//!                completed phases push ElevatorArrived / DoorsOpened /
//!                DoorsClosed events.
//!   ③ Dispatch — Dispatcher::tick(): claim scan + re-dispatch idle cars.
//!   ④ Drain    — pop queued events non-blockingly, routing each to its
//!                dispatcher callback (external requests and the events
//!                produced in ②).
//!   ⑤ Publish  — advance the clock and publish a FleetSnapshot.
//! ```
//!
//! One dedicated consumer thread owns the `Building` and the dispatcher;
//! producers interact only through a cloneable [`EngineHandle`] (validated
//! request ingress + read-only snapshots).
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`driver`]   | per-tick car state-machine advance                     |
//! | [`engine`]   | `Engine`, `EngineThread`, `EngineHandle`               |
//! | [`builder`]  | `EngineBuilder` — validate config, wire components     |
//! | [`observer`] | `EngineObserver` trait + `NoopObserver`                |
//! | [`traffic`]  | `TrafficGenerator` — seeded synthetic request producer |
//! | [`error`]    | `EngineError`, `RequestError`                          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_core::SimConfig;
//! use lift_engine::EngineBuilder;
//!
//! let engine = EngineBuilder::new(SimConfig::default()).build()?;
//! let thread = engine.spawn();
//! thread.handle().request_hall_call(3, Direction::Up)?;
//! // ...
//! thread.handle().stop();
//! let engine = thread.join().unwrap();
//! ```

pub mod builder;
pub mod driver;
pub mod engine;
pub mod error;
pub mod observer;
pub mod traffic;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use engine::{Engine, EngineHandle, EngineThread};
pub use error::{EngineError, EngineResult, RequestError};
pub use observer::{EngineObserver, NoopObserver};
pub use traffic::TrafficGenerator;
