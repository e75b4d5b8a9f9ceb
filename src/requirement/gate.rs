use crate::core::{Condition, ResourceId, ResourceStore};
use crate::decimal::Decimal;

use super::{Requirement, RequirementReport};

/// A boolean gate that spends nothing. Holding it allows any batch size.
#[derive(Debug, Clone)]
pub struct ConditionRequirement {
    condition: Condition,
    visibility: Condition,
    description: String,
}

impl ConditionRequirement {
    pub fn new(condition: impl Into<Condition>, description: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            visibility: Condition::always(),
            description: description.into(),
        }
    }

    pub fn visibility(visibility: impl Into<Condition>) -> Self {
        let visibility = visibility.into();
        Self {
            condition: visibility.clone(),
            visibility,
            description: "Visible".to_string(),
        }
    }
}

impl Requirement for ConditionRequirement {
    fn resource(&self) -> Option<ResourceId> {
        None
    }

    fn is_visible(&self, store: &ResourceStore) -> bool {
        self.visibility.evaluate(store)
    }

    fn requires_pay(&self) -> bool {
        false
    }

    fn can_maximize(&self) -> bool {
        true
    }

    fn amount_affordable(&self, store: &ResourceStore) -> Decimal {
        if self.condition.evaluate(store) {
            Decimal::INFINITY
        } else {
            Decimal::ZERO
        }
    }

    fn cost_for(&self, _amount: Decimal, _store: &ResourceStore) -> Decimal {
        Decimal::ZERO
    }

    fn pay(&self, _amount: Decimal, _store: &mut ResourceStore) {}

    fn describe(&self, store: &ResourceStore) -> RequirementReport {
        RequirementReport {
            description: self.description.clone(),
            resource: None,
            cost: Decimal::ZERO,
            met: self.condition.evaluate(store),
            visible: self.is_visible(store),
            requires_pay: false,
        }
    }
}
