mod app;

use std::env;

use anyhow::Result;
use bevy::app::{ScheduleRunnerPlugin, TerminalCtrlCHandlerPlugin};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use incremental_engine::{EngineConfig, load_config_from_path};

fn main() -> Result<()> {
    let config = match env::args().nth(1) {
        Some(path) => load_config_from_path(path)?,
        None => EngineConfig::default(),
    };

    // Frames only need to be frequent enough to drive the tick timer.
    let frame_interval = std::time::Duration::from_secs_f64(config.tick_seconds());

    App::new()
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(frame_interval)),
            LogPlugin::default(),
            StatesPlugin,
            TerminalCtrlCHandlerPlugin,
        ))
        .insert_resource(app::RuntimeConfig(config))
        .add_plugins(app::EngineAppPlugin)
        .run();

    Ok(())
}
