//! `lift-core` — foundational types for the `lift` elevator-group simulator.
//!
//! This crate is a dependency of every other `lift-*` crate.  It intentionally
//! has no `lift-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`ids`]       | `CarId`                                               |
//! | [`direction`] | `Direction` enum                                      |
//! | [`state`]     | `CarState` enum                                       |
//! | [`call`]      | `HallCall` — the (floor, direction) dispatch key      |
//! | [`time`]      | `Tick`, `SimClock`, `SimConfig`, `ControllerKind`     |
//! | [`rng`]       | `SimRng` (seeded, deterministic)                      |
//! | [`error`]     | `LiftError`, `LiftResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod call;
pub mod direction;
pub mod error;
pub mod ids;
pub mod rng;
pub mod state;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use call::HallCall;
pub use direction::Direction;
pub use error::{LiftError, LiftResult};
pub use ids::CarId;
pub use rng::SimRng;
pub use state::CarState;
pub use time::{ControllerKind, SimClock, SimConfig, Tick};
