use std::time::Duration;

use bevy::prelude::*;
use incremental_engine::{EngineConfig, Simulation};

#[derive(Resource, Debug, Clone, Default)]
pub struct RuntimeConfig(pub EngineConfig);

#[derive(Resource, Debug)]
pub struct SessionState {
    pub simulation: Simulation,
    pub tick_timer: Timer,
    pub autosave_timer: Timer,
}

impl SessionState {
    pub fn new(simulation: Simulation, config: &EngineConfig) -> Self {
        Self {
            simulation,
            tick_timer: Timer::new(
                Duration::from_secs_f64(config.tick_seconds()),
                TimerMode::Repeating,
            ),
            autosave_timer: Timer::from_seconds(
                config.autosave_interval_seconds.max(1.0),
                TimerMode::Repeating,
            ),
        }
    }

    pub fn step_seconds(&self) -> f64 {
        self.tick_timer.duration().as_secs_f64()
    }
}

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub repeatable: String,
}

impl PurchaseRequest {
    pub fn new(repeatable: impl Into<String>) -> Self {
        Self {
            repeatable: repeatable.into(),
        }
    }
}
