mod build;
mod config;
mod content;
mod loader;

pub use build::{ContentError, build_simulation};
pub use config::EngineConfig;
pub use content::{
    ConditionDefinition, ContentFile, CostDefinition, CurveDefinition, FlowDefinition,
    FlowKindDefinition, LayerDefinition, ModifierDefinition, ModifierKindDefinition,
    RepeatableDefinition, ResourceDefinition, RuleDefinition, ValueDefinition,
};
pub use loader::{
    bundled_content_path, load_bundled_content, load_config_from_path, load_content_from_path,
};
