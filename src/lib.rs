pub mod core;
pub mod data;
pub mod decimal;
pub mod model;
pub mod modifier;
pub mod requirement;
pub mod save;

pub use core::{
    Computable, Condition, Resource, ResourceId, ResourceStore, Simulation, TickPhase, TickSummary,
};
pub use data::{
    ContentError, ContentFile, EngineConfig, build_simulation, bundled_content_path,
    load_bundled_content, load_config_from_path, load_content_from_path,
};
pub use decimal::{Decimal, ParseDecimalError};
pub use model::{ActiveInstances, Flow, FlowKind, Layer, ProductionRule, PurchaseState, Repeatable};
pub use modifier::{Modifier, ModifierReport, SequentialModifier, Transform, TransformKind};
pub use requirement::{
    ConditionRequirement, CostCurve, CostRequirement, Requirement, RequirementReport,
    SharedRequirement, list_costs, max_requirements_met, pay_requirements, requirements_cover,
    requirements_met,
};
pub use save::{
    SaveData, SaveResource, apply_save_data, export_to_base64, import_from_base64,
    load_from_json_string, read_save_file, save_data_from_simulation, save_to_json_string,
    write_save_file,
};
