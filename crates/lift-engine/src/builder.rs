//! Builder for constructing an [`Engine`].

use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::{Arc, Mutex};

use lift_core::{SimConfig, Tick};
use lift_dispatch::build_dispatcher;
use lift_events::EventQueue;
use lift_fleet::Building;

use crate::engine::Shared;
use crate::{Engine, EngineResult};

/// Builder for [`Engine`].
///
/// Validates the configuration, then wires the building, the event queue,
/// and the dispatch policy selected by `config.controller`.
///
/// # Example
///
/// ```rust,ignore
/// let engine = EngineBuilder::new(SimConfig {
///     num_floors: 8,
///     controller: ControllerKind::Distributed,
///     ..SimConfig::default()
/// })
/// .build()?;
/// ```
pub struct EngineBuilder {
    config: SimConfig,
}

impl EngineBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    /// Validate every configuration bound and assemble the engine.
    pub fn build(self) -> EngineResult<Engine> {
        self.config.validate()?;

        let queue = Arc::new(EventQueue::new());
        let dispatcher = build_dispatcher(&self.config, Arc::clone(&queue));
        let building = Building::new(&self.config);
        let clock = self.config.make_clock();

        let shared = Shared {
            queue,
            stop_flag: Arc::new(AtomicBool::new(false)),
            running: Arc::new(AtomicBool::new(false)),
            tick_counter: Arc::new(AtomicU64::new(0)),
            snapshot: Arc::new(Mutex::new(building.snapshot(Tick::ZERO))),
        };

        Ok(Engine {
            config: self.config,
            clock,
            building,
            dispatcher,
            shared,
        })
    }
}
