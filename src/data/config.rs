use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tick_hz: f32,
    pub content_path: Option<PathBuf>,
    pub save_path: PathBuf,
    pub autosave_interval_seconds: f32,
    /// Bounds catch-up work after a long frame.
    pub max_ticks_per_frame: u32,
    pub autobuy: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_hz: 20.0,
            content_path: None,
            save_path: PathBuf::from("save.json"),
            autosave_interval_seconds: 30.0,
            max_ticks_per_frame: 8,
            autobuy: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn tick_seconds(&self) -> f64 {
        (1.0 / f64::from(self.tick_hz)).max(0.001)
    }
}
