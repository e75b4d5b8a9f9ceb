mod resources;
mod setup;
mod simulation;
mod state;

use bevy::prelude::*;

pub use resources::RuntimeConfig;
use resources::PurchaseRequest;
use state::{AppPhase, SimRunState};

pub struct EngineAppPlugin;

impl Plugin for EngineAppPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppPhase>()
            .init_state::<SimRunState>()
            .init_resource::<RuntimeConfig>()
            .add_event::<PurchaseRequest>()
            .add_systems(OnEnter(AppPhase::Boot), setup::bootstrap_session)
            .add_systems(OnEnter(SimRunState::Running), simulation::mark_sim_running)
            .add_systems(OnEnter(SimRunState::Paused), simulation::mark_sim_paused)
            .add_systems(
                Update,
                (
                    simulation::queue_autobuy,
                    simulation::apply_purchase_requests,
                    simulation::tick_simulation.run_if(in_state(SimRunState::Running)),
                    simulation::autosave_session,
                )
                    .chain()
                    .run_if(in_state(AppPhase::InGame)),
            )
            .add_systems(
                Last,
                simulation::save_on_exit.run_if(in_state(AppPhase::InGame)),
            );
    }
}
