use bevy::prelude::*;
use incremental_engine::{Decimal, save_data_from_simulation, write_save_file};

use super::resources::{PurchaseRequest, RuntimeConfig, SessionState};

pub fn queue_autobuy(config: Res<RuntimeConfig>, mut requests: EventWriter<PurchaseRequest>) {
    for id in &config.0.autobuy {
        requests.send(PurchaseRequest::new(id.as_str()));
    }
}

pub fn apply_purchase_requests(
    mut requests: EventReader<PurchaseRequest>,
    mut session: ResMut<SessionState>,
) {
    for request in requests.read() {
        let bought = session.simulation.purchase(&request.repeatable);
        if bought > Decimal::ZERO {
            info!(repeatable = %request.repeatable, %bought, "bought");
        }
    }
}

pub fn tick_simulation(
    time: Res<Time>,
    config: Res<RuntimeConfig>,
    mut session: ResMut<SessionState>,
) {
    let finished = session
        .tick_timer
        .tick(time.delta())
        .times_finished_this_tick();
    let steps = finished.min(config.0.max_ticks_per_frame);
    if steps < finished {
        debug!(dropped = finished - steps, "tick backlog trimmed");
    }

    let seconds = session.step_seconds();
    for _ in 0..steps {
        let summary = session.simulation.tick(seconds);
        if summary.starved_rules > 0 {
            trace!(
                tick = session.simulation.tick_index,
                starved = summary.starved_rules,
                "rules starved this tick"
            );
        }
    }
}

pub fn autosave_session(
    time: Res<Time>,
    config: Res<RuntimeConfig>,
    mut session: ResMut<SessionState>,
) {
    if !session.autosave_timer.tick(time.delta()).just_finished() {
        return;
    }
    save_session(&config, &session);
}

pub fn save_on_exit(
    mut exits: EventReader<AppExit>,
    config: Res<RuntimeConfig>,
    session: Res<SessionState>,
) {
    if exits.read().next().is_some() {
        save_session(&config, &session);
    }
}

pub fn mark_sim_running(session: Option<ResMut<SessionState>>) {
    if let Some(mut session) = session {
        session.simulation.paused = false;
    }
}

pub fn mark_sim_paused(session: Option<ResMut<SessionState>>) {
    if let Some(mut session) = session {
        session.simulation.paused = true;
    }
}

fn save_session(config: &RuntimeConfig, session: &SessionState) {
    let save = save_data_from_simulation(&session.simulation);
    match write_save_file(&config.0.save_path, &save) {
        Ok(()) => debug!(
            path = %config.0.save_path.display(),
            tick = session.simulation.tick_index,
            "saved"
        ),
        Err(err) => warn!("save failed: {err:#}"),
    }
}
