mod bridge;
mod codec;
mod model;

pub use bridge::{apply_save_data, save_data_from_simulation};
pub use codec::{
    export_to_base64, import_from_base64, load_from_json_string, read_save_file,
    save_to_json_string, write_save_file,
};
pub use model::{SAVE_VERSION, SaveData, SaveResource};

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{
        SaveData, SaveResource, apply_save_data, export_to_base64, import_from_base64,
        load_from_json_string, read_save_file, save_data_from_simulation, save_to_json_string,
        write_save_file,
    };
    use crate::core::{ResourceStore, Simulation};
    use crate::decimal::Decimal;

    fn sample_save() -> SaveData {
        let mut resources = BTreeMap::new();
        resources.insert(
            "logs".to_string(),
            SaveResource {
                value: Decimal::from(49000.0),
                total: Decimal::from(123456.5),
            },
        );
        resources.insert(
            "coal".to_string(),
            SaveResource {
                value: Decimal::from(10.0).pow(450.25),
                total: Decimal::from(10.0).pow(451.0),
            },
        );
        SaveData {
            resources,
            tick_index: 42,
            elapsed_seconds: 2.1,
            paused: true,
            ..SaveData::default()
        }
    }

    fn sample_simulation() -> Simulation {
        let mut store = ResourceStore::new();
        store.register("logs", "Logs", Decimal::ZERO);
        store.register("coal", "Coal", Decimal::ZERO);
        store.register("lumberjacks", "Lumberjacks", Decimal::ZERO);
        Simulation::new(store)
    }

    #[test]
    fn save_json_round_trip() {
        let original = sample_save();
        let json = save_to_json_string(&original).expect("save JSON should serialize");
        let restored = load_from_json_string(&json).expect("save JSON should deserialize");

        assert_eq!(restored, original);
    }

    #[test]
    fn save_base64_round_trip() {
        let original = sample_save();
        let encoded = export_to_base64(&original).expect("save should export to base64");
        let restored = import_from_base64(&encoded).expect("save should import from base64");

        assert_eq!(restored, original);
    }

    #[test]
    fn simulation_bridge_round_trip() {
        let mut sim = sample_simulation();
        let logs = sim.resources.id("logs").expect("logs registered");
        let jacks = sim.resources.id("lumberjacks").expect("lumberjacks registered");
        sim.resources.add(logs, Decimal::from(250.0));
        sim.resources.spend(logs, Decimal::from(50.0));
        sim.resources.set(jacks, Decimal::from(7.0));
        sim.tick_index = 9;

        let save = save_data_from_simulation(&sim);
        let mut restored = sample_simulation();
        apply_save_data(&mut restored, &save).expect("save apply should succeed");

        assert_eq!(restored.resources.value_of("logs"), Some(Decimal::from(200.0)));
        assert_eq!(restored.resources.value_of("lumberjacks"), Some(Decimal::from(7.0)));
        let logs = restored.resources.get(logs).expect("logs restored");
        assert_eq!(logs.total, Decimal::from(250.0));
        assert_eq!(restored.tick_index, 9);
    }

    #[test]
    fn unknown_resources_are_skipped_and_newer_versions_rejected() {
        let mut sim = sample_simulation();
        let mut save = sample_save();
        save.resources
            .insert("retired".to_string(), SaveResource::default());
        apply_save_data(&mut sim, &save).expect("unknown entries are ignored");
        assert_eq!(sim.resources.value_of("logs"), Some(Decimal::from(49000.0)));
        assert!(sim.resources.id("retired").is_none());

        save.version += 1;
        assert!(apply_save_data(&mut sim, &save).is_err());
    }

    #[test]
    fn save_file_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("save.json");
        let original = sample_save();

        write_save_file(&path, &original).expect("save should write");
        let restored = read_save_file(&path).expect("save should read back");
        assert_eq!(restored, original);
    }
}
