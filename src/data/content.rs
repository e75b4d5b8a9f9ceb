use serde::{Deserialize, Serialize};

use crate::decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentFile {
    #[serde(default)]
    pub resources: Vec<ResourceDefinition>,
    #[serde(default)]
    pub repeatables: Vec<RepeatableDefinition>,
    #[serde(default)]
    pub layers: Vec<LayerDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub initial: Decimal,
}

/// A number that is either written out or read from a resource as
/// `resource * factor + offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueDefinition {
    Constant(Decimal),
    Scaled {
        resource: String,
        #[serde(default = "default_factor")]
        factor: Decimal,
        #[serde(default)]
        offset: Decimal,
    },
}

impl Default for ValueDefinition {
    fn default() -> Self {
        Self::Constant(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionDefinition {
    pub resource: String,
    pub at_least: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKindDefinition {
    Additive,
    Multiplicative,
    Exponential,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierDefinition {
    pub kind: ModifierKindDefinition,
    pub amount: ValueDefinition,
    #[serde(default)]
    pub support_low_numbers: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled_when: Option<ConditionDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "curve", rename_all = "snake_case")]
pub enum CurveDefinition {
    Fixed { cost: Decimal },
    /// Priced along the owning repeatable's count.
    Geometric { base: Decimal, ratio: Decimal },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostDefinition {
    pub resource: String,
    #[serde(flatten)]
    pub curve: CurveDefinition,
    #[serde(default = "default_true")]
    pub requires_pay: bool,
    #[serde(default = "default_true")]
    pub can_maximize: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatableDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Resource holding the owned count; defaults to the repeatable's id.
    #[serde(default)]
    pub count_resource: Option<String>,
    #[serde(default)]
    pub costs: Vec<CostDefinition>,
    #[serde(default)]
    pub limit: Option<Decimal>,
    #[serde(default)]
    pub upgrade: bool,
    #[serde(default)]
    pub buy_max: bool,
    #[serde(default)]
    pub visible_when: Option<ConditionDefinition>,
    #[serde(default)]
    pub active_resource: Option<String>,
    #[serde(default)]
    pub free_levels: Option<ValueDefinition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKindDefinition {
    Produce,
    Consume,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDefinition {
    pub resource: String,
    pub kind: FlowKindDefinition,
    pub rate: ValueDefinition,
    #[serde(default)]
    pub modifiers: Vec<ModifierDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub name: String,
    #[serde(default)]
    pub flows: Vec<FlowDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub unlock: Option<ConditionDefinition>,
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

fn default_factor() -> Decimal {
    Decimal::ONE
}

const fn default_true() -> bool {
    true
}
