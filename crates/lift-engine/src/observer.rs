//! Engine observer trait for progress reporting and test instrumentation.

use lift_core::Tick;
use lift_events::Event;

/// Callbacks invoked by the engine at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Combined with
/// [`EngineHandle::snapshot`][crate::EngineHandle::snapshot] (the snapshot
/// for a tick is published before `on_tick_end` fires), an observer can
/// verify fleet state at every tick boundary.
///
/// # Example — event logger
///
/// ```rust,ignore
/// struct EventLog(Vec<Event>);
///
/// impl EngineObserver for EventLog {
///     fn on_event(&mut self, _tick: Tick, event: &Event) {
///         self.0.push(*event);
///     }
/// }
/// ```
pub trait EngineObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called for every event drained from the queue this tick, in routing
    /// order.
    fn on_event(&mut self, _tick: Tick, _event: &Event) {}

    /// Called at the end of each tick.  `events_processed` counts the
    /// events drained this tick.
    fn on_tick_end(&mut self, _tick: Tick, _events_processed: usize) {}

    /// Called once when the engine loop exits.
    fn on_stop(&mut self, _final_tick: Tick) {}
}

/// An [`EngineObserver`] that does nothing.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
