//! `lift-events` — the event vocabulary and the thread-safe event queue.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`event`] | `Event` enum — external requests and state-change notices |
//! | [`queue`] | `EventQueue<T>` — MPMC FIFO with blocking pop + shutdown  |
//!
//! # Design notes
//!
//! Every external request and every internal state-change notification is
//! serialized through one `EventQueue<Event>` into the engine's single
//! consumer thread.  Producers (console, traffic generators, test harnesses)
//! only ever `push`; the engine drains non-blockingly once per tick.
//! `pop_blocking` exists for variants that prefer blocking consumption.

pub mod event;
pub mod queue;


pub use event::Event;
pub use queue::EventQueue;
