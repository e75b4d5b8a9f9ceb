use anyhow::{Result, bail};
use tracing::warn;

use crate::Simulation;

use super::{SAVE_VERSION, SaveData, SaveResource};

pub fn save_data_from_simulation(sim: &Simulation) -> SaveData {
    let resources = sim
        .resources
        .iter()
        .map(|(_, resource)| {
            (
                resource.key.clone(),
                SaveResource {
                    value: resource.value,
                    total: resource.total,
                },
            )
        })
        .collect();

    SaveData {
        version: SAVE_VERSION,
        resources,
        tick_index: sim.tick_index,
        elapsed_seconds: sim.elapsed_seconds,
        paused: sim.paused,
    }
}

/// Restores values onto a simulation built from the same content. Entries
/// for resources the content no longer declares are skipped.
pub fn apply_save_data(sim: &mut Simulation, save: &SaveData) -> Result<()> {
    if save.version > SAVE_VERSION {
        bail!(
            "save version {} is newer than supported version {SAVE_VERSION}",
            save.version
        );
    }

    for (key, saved) in &save.resources {
        let Some(id) = sim.resources.id(key) else {
            warn!(resource = %key, "save references unknown resource; skipping");
            continue;
        };
        if let Some(resource) = sim.resources.get_mut(id) {
            resource.value = saved.value;
            resource.total = saved.total;
        }
    }
    sim.resources.begin_tick();
    sim.tick_index = save.tick_index;
    sim.elapsed_seconds = save.elapsed_seconds.max(0.0);
    sim.paused = save.paused;

    Ok(())
}
