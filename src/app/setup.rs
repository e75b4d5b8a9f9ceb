use anyhow::{Context, Result};
use bevy::prelude::*;
use incremental_engine::{
    EngineConfig, Simulation, apply_save_data, build_simulation, load_bundled_content,
    load_content_from_path, read_save_file,
};

use super::resources::{RuntimeConfig, SessionState};
use super::state::{AppPhase, SimRunState};

pub fn bootstrap_session(
    mut commands: Commands,
    config: Res<RuntimeConfig>,
    mut next_phase: ResMut<NextState<AppPhase>>,
    mut next_run_state: ResMut<NextState<SimRunState>>,
    mut exit: EventWriter<AppExit>,
) {
    let config = &config.0;
    let mut simulation = match load_simulation(config) {
        Ok(simulation) => simulation,
        Err(err) => {
            error!("failed to start session: {err:#}");
            exit.send(AppExit::error());
            return;
        }
    };

    if config.save_path.exists() {
        match read_save_file(&config.save_path)
            .and_then(|save| apply_save_data(&mut simulation, &save))
        {
            Ok(()) => info!(
                path = %config.save_path.display(),
                tick = simulation.tick_index,
                "restored save"
            ),
            Err(err) => warn!("ignoring unreadable save: {err:#}"),
        }
    }

    next_run_state.set(SimRunState::from_paused(simulation.paused));

    commands.insert_resource(SessionState::new(simulation, config));

    next_phase.set(AppPhase::InGame);
}

fn load_simulation(config: &EngineConfig) -> Result<Simulation> {
    let content = match &config.content_path {
        Some(path) => load_content_from_path(path)?,
        None => load_bundled_content()?,
    };
    let simulation = build_simulation(&content).context("content failed validation")?;
    info!(
        layers = simulation.layers().len(),
        repeatables = simulation.repeatables().len(),
        "content loaded"
    );
    Ok(simulation)
}
