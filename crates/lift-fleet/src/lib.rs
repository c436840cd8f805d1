//! `lift-fleet` — the sole source of mutable fleet truth.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`floor`]    | `Floor` — landing with up/down request flags          |
//! | [`car`]      | `Car` — position, direction, state, calls, timer      |
//! | [`building`] | `Building` — owns the floor and car vectors           |
//! | [`snapshot`] | `CarSnapshot`, `FleetSnapshot` — read-only views      |
//!
//! # Ownership model
//!
//! The `Building` is owned by the engine's single consumer thread; nothing
//! else holds a writable handle.  External readers receive `FleetSnapshot`
//! values published once per tick.  This replaces the per-car/per-building
//! locking a shared-memory design would need: no state-machine or dispatch
//! code can ever observe a torn car state because only one thread mutates.
//!
//! Floor and car lookups index directly and panic on out-of-range input;
//! user-supplied floors and car ids are validated at the request ingress, so
//! a panic here is a programmer error, not a user error.

pub mod building;
pub mod car;
pub mod floor;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use building::Building;
pub use car::Car;
pub use floor::Floor;
pub use snapshot::{CarSnapshot, FleetSnapshot};
