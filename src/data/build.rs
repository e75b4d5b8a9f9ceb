use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::core::{Computable, Condition, ResourceId, ResourceStore, Simulation};
use crate::decimal::Decimal;
use crate::model::{ActiveInstances, Flow, FlowKind, Layer, ProductionRule, Repeatable};
use crate::modifier::{SequentialModifier, Transform, TransformKind};
use crate::requirement::{ConditionRequirement, CostCurve, CostRequirement};

use super::content::{
    ConditionDefinition, ContentFile, CostDefinition, CurveDefinition, FlowKindDefinition,
    ModifierDefinition, ModifierKindDefinition, RepeatableDefinition, ValueDefinition,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("{context} references unknown resource `{resource}`")]
    UnknownResource { resource: String, context: String },
    #[error("duplicate {kind} id `{id}`")]
    Duplicate { kind: &'static str, id: String },
}

/// Turns definitions into a runnable simulation. Layers keep file order,
/// which is also their integration order.
pub fn build_simulation(content: &ContentFile) -> Result<Simulation, ContentError> {
    let mut store = ResourceStore::new();
    for resource in &content.resources {
        if store.id(&resource.id).is_some() {
            return Err(ContentError::Duplicate {
                kind: "resource",
                id: resource.id.clone(),
            });
        }
        store.register(
            resource.id.as_str(),
            display_name(&resource.name, &resource.id),
            resource.initial,
        );
    }

    let mut repeatables = Vec::with_capacity(content.repeatables.len());
    let mut repeatable_ids = HashSet::new();
    for definition in &content.repeatables {
        if !repeatable_ids.insert(definition.id.as_str()) {
            return Err(ContentError::Duplicate {
                kind: "repeatable",
                id: definition.id.clone(),
            });
        }
        repeatables.push(build_repeatable(definition, &mut store)?);
    }

    let mut layers = Vec::with_capacity(content.layers.len());
    let mut layer_ids = HashSet::new();
    for definition in &content.layers {
        if !layer_ids.insert(definition.id.as_str()) {
            return Err(ContentError::Duplicate {
                kind: "layer",
                id: definition.id.clone(),
            });
        }
        let context = format!("layer `{}`", definition.id);
        let mut layer = Layer::new(
            definition.id.as_str(),
            display_name(&definition.name, &definition.id),
        );
        if let Some(unlock) = &definition.unlock {
            layer = layer.unlocked_when(condition(unlock, &store, &context)?);
        }
        for rule in &definition.rules {
            let mut production = ProductionRule::new(rule.name.as_str());
            for flow in &rule.flows {
                let resource = resolve(&store, &flow.resource, &context)?;
                let kind = match flow.kind {
                    FlowKindDefinition::Produce => FlowKind::Produce,
                    FlowKindDefinition::Consume => FlowKind::Consume,
                };
                let mut built = Flow::new(resource, kind, value(&flow.rate, &store, &context)?);
                if !flow.modifiers.is_empty() {
                    built = built.with_modifier(modifier_chain(&flow.modifiers, &store, &context)?);
                }
                production = production.with_flow(built);
            }
            layer = layer.with_rule(production);
        }
        layers.push(layer);
    }

    let mut simulation = Simulation::new(store);
    for repeatable in repeatables {
        simulation.add_repeatable(repeatable);
    }
    for layer in layers {
        simulation.add_layer(layer);
    }
    Ok(simulation)
}

fn build_repeatable(
    definition: &RepeatableDefinition,
    store: &mut ResourceStore,
) -> Result<Repeatable, ContentError> {
    let context = format!("repeatable `{}`", definition.id);
    let name = display_name(&definition.name, &definition.id);
    // An explicit count resource may be a declared one; the implicit one may not.
    let count = match definition.count_resource.as_deref() {
        Some(key) => store.register(key, name.as_str(), Decimal::ZERO),
        None if store.id(&definition.id).is_some() => {
            return Err(ContentError::Duplicate {
                kind: "resource",
                id: definition.id.clone(),
            });
        }
        None => store.register(definition.id.as_str(), name.as_str(), Decimal::ZERO),
    };

    let mut repeatable = Repeatable::new(definition.id.as_str(), count)
        .with_display_name(name)
        .buying_max(definition.buy_max);

    if let Some(visible) = &definition.visible_when {
        let visibility = condition(visible, store, &context)?;
        repeatable = repeatable
            .visible_when(visibility.clone())
            .requiring(Arc::new(ConditionRequirement::visibility(visibility)));
    }
    for cost in &definition.costs {
        let requirement = cost_requirement(cost, count, store, &context)?;
        repeatable = repeatable.requiring(Arc::new(requirement));
    }

    if definition.upgrade {
        repeatable = repeatable.with_limit(Decimal::ONE);
    } else if let Some(limit) = definition.limit {
        repeatable = repeatable.with_limit(limit);
    }
    if let Some(free_levels) = &definition.free_levels {
        repeatable = repeatable.with_free_levels(value(free_levels, store, &context)?);
    }
    if let Some(active) = &definition.active_resource {
        let active = resolve(store, active, &context)?;
        repeatable = repeatable.activates(ActiveInstances::new(count, active));
    }
    Ok(repeatable)
}

fn cost_requirement(
    definition: &CostDefinition,
    count: ResourceId,
    store: &ResourceStore,
    context: &str,
) -> Result<CostRequirement, ContentError> {
    let resource = resolve(store, &definition.resource, context)?;
    let curve = match &definition.curve {
        CurveDefinition::Fixed { cost } => CostCurve::fixed(*cost),
        CurveDefinition::Geometric { base, ratio } => {
            CostCurve::geometric(*base, *ratio, Computable::resource(count))
        }
    };
    let mut requirement = CostRequirement::new(resource, curve);
    if !definition.requires_pay {
        requirement = requirement.without_payment();
    }
    if !definition.can_maximize {
        requirement = requirement.without_maximize();
    }
    Ok(requirement)
}

fn modifier_chain(
    definitions: &[ModifierDefinition],
    store: &ResourceStore,
    context: &str,
) -> Result<SequentialModifier, ContentError> {
    let mut chain = SequentialModifier::new();
    for definition in definitions {
        let kind = match definition.kind {
            ModifierKindDefinition::Additive => TransformKind::Additive,
            ModifierKindDefinition::Multiplicative => TransformKind::Multiplicative,
            ModifierKindDefinition::Exponential => TransformKind::Exponential {
                support_low_numbers: definition.support_low_numbers,
            },
        };
        let mut transform = Transform::new(kind, value(&definition.amount, store, context)?);
        if let Some(enabled) = &definition.enabled_when {
            transform = transform.enabled_when(condition(enabled, store, context)?);
        }
        if let Some(description) = &definition.description {
            transform = transform.with_description(description.as_str());
        }
        chain.push(transform);
    }
    Ok(chain)
}

fn value(
    definition: &ValueDefinition,
    store: &ResourceStore,
    context: &str,
) -> Result<Computable<Decimal>, ContentError> {
    match definition {
        ValueDefinition::Constant(value) => Ok(Computable::Constant(*value)),
        ValueDefinition::Scaled {
            resource,
            factor,
            offset,
        } => Ok(Computable::scaled(
            resolve(store, resource, context)?,
            *factor,
            *offset,
        )),
    }
}

fn condition(
    definition: &ConditionDefinition,
    store: &ResourceStore,
    context: &str,
) -> Result<Condition, ContentError> {
    let resource = resolve(store, &definition.resource, context)?;
    Ok(Condition::at_least(resource, definition.at_least))
}

fn resolve(store: &ResourceStore, key: &str, context: &str) -> Result<ResourceId, ContentError> {
    store.id(key).ok_or_else(|| ContentError::UnknownResource {
        resource: key.to_string(),
        context: context.to_string(),
    })
}

fn display_name(name: &str, id: &str) -> String {
    if name.is_empty() {
        id.to_string()
    } else {
        name.to_string()
    }
}
