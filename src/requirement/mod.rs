//! Purchase gates. A purchase checks a whole list of requirements, asks how
//! many units every one of them can cover, and only then pays them all.

mod cost;
mod gate;

pub use cost::{CostCurve, CostFn, CostRequirement};
pub use gate::ConditionRequirement;

use std::sync::Arc;

use crate::core::{ResourceId, ResourceStore};
use crate::decimal::Decimal;

pub type SharedRequirement = Arc<dyn Requirement>;

pub trait Requirement: Send + Sync {
    fn resource(&self) -> Option<ResourceId>;

    fn is_visible(&self, store: &ResourceStore) -> bool;

    /// Requirements that do not pay still gate on the balance.
    fn requires_pay(&self) -> bool;

    /// When false a batch purchase is capped at a single unit.
    fn can_maximize(&self) -> bool;

    /// Whole units the current balance covers; zero when not even one.
    fn amount_affordable(&self, store: &ResourceStore) -> Decimal;

    fn cost_for(&self, amount: Decimal, store: &ResourceStore) -> Decimal;

    fn pay(&self, amount: Decimal, store: &mut ResourceStore);

    fn describe(&self, store: &ResourceStore) -> RequirementReport;
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequirementReport {
    pub description: String,
    pub resource: Option<String>,
    pub cost: Decimal,
    pub met: bool,
    pub visible: bool,
    pub requires_pay: bool,
}

pub fn requirement_capacity(requirement: &dyn Requirement, store: &ResourceStore) -> Decimal {
    let affordable = requirement.amount_affordable(store).or_zero();
    if requirement.can_maximize() {
        affordable
    } else {
        affordable.min(Decimal::ONE)
    }
}

const MAX_BISECTIONS: usize = 200;

/// Every requirement is visible and one unit of the whole list is affordable.
pub fn requirements_met(requirements: &[SharedRequirement], store: &ResourceStore) -> bool {
    requirements.iter().all(|requirement| {
        requirement.is_visible(store) && requirement.amount_affordable(store) >= Decimal::ONE
    }) && requirements_cover(requirements, Decimal::ONE, store)
}

/// Largest batch the whole list covers at once. An empty list imposes no
/// bound.
pub fn max_requirements_met(requirements: &[SharedRequirement], store: &ResourceStore) -> Decimal {
    let bound = requirements
        .iter()
        .map(|requirement| {
            if requirement.is_visible(store) {
                requirement_capacity(&**requirement, store)
            } else {
                Decimal::ZERO
            }
        })
        .fold(Decimal::INFINITY, |lowest, capacity| lowest.min(capacity));
    if !bound.is_finite() || requirements_cover(requirements, bound, store) {
        return bound;
    }

    // Costs only grow with the batch, so the covered sizes form a prefix.
    let mut low = Decimal::ZERO;
    let mut high = bound;
    for _ in 0..MAX_BISECTIONS {
        if high - low <= Decimal::ONE {
            break;
        }
        let middle = ((low + high) / 2.0).floor();
        if requirements_cover(requirements, middle, store) {
            low = middle;
        } else {
            high = middle;
        }
    }
    low
}

/// Whether the balances pay for `amount` units of every paying requirement
/// together, with costs on the same resource summed.
pub fn requirements_cover(
    requirements: &[SharedRequirement],
    amount: Decimal,
    store: &ResourceStore,
) -> bool {
    let mut totals: Vec<(ResourceId, Decimal)> = Vec::new();
    for requirement in requirements.iter().filter(|requirement| requirement.requires_pay()) {
        let Some(resource) = requirement.resource() else {
            continue;
        };
        let cost = requirement.cost_for(amount, store);
        match totals.iter_mut().find(|(id, _)| *id == resource) {
            Some((_, total)) => *total += cost,
            None => totals.push((resource, cost)),
        }
    }
    totals
        .iter()
        .all(|(resource, total)| *total <= store.value(*resource))
}

/// Deducts `amount` units' worth from every paying requirement. Callers
/// confirm `max_requirements_met(..) >= amount` first.
pub fn pay_requirements(
    requirements: &[SharedRequirement],
    amount: Decimal,
    store: &mut ResourceStore,
) {
    for requirement in requirements.iter().filter(|requirement| requirement.requires_pay()) {
        requirement.pay(amount, store);
    }
}

/// Total cost per resource of buying `amount` more units, for display.
pub fn list_costs(
    requirements: &[SharedRequirement],
    amount: Decimal,
    store: &ResourceStore,
) -> Vec<RequirementReport> {
    requirements
        .iter()
        .filter(|requirement| requirement.resource().is_some())
        .map(|requirement| RequirementReport {
            cost: requirement.cost_for(amount, store),
            ..requirement.describe(store)
        })
        .collect()
}
