use crate::core::{Computable, Condition, ResourceId, ResourceStore};
use crate::decimal::Decimal;
use crate::modifier::{Modifier, SequentialModifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Produce,
    Consume,
}

/// One resource a rule moves. Rates are per second and always given as
/// magnitudes; the kind decides the sign.
#[derive(Debug, Clone)]
pub struct Flow {
    pub resource: ResourceId,
    pub kind: FlowKind,
    base_rate: Computable<Decimal>,
    modifier: Option<SequentialModifier>,
}

impl Flow {
    pub fn produce(resource: ResourceId, rate: impl Into<Computable<Decimal>>) -> Self {
        Self::new(resource, FlowKind::Produce, rate)
    }

    pub fn consume(resource: ResourceId, rate: impl Into<Computable<Decimal>>) -> Self {
        Self::new(resource, FlowKind::Consume, rate)
    }

    pub fn new(
        resource: ResourceId,
        kind: FlowKind,
        rate: impl Into<Computable<Decimal>>,
    ) -> Self {
        Self {
            resource,
            kind,
            base_rate: rate.into(),
            modifier: None,
        }
    }

    pub fn with_modifier(mut self, modifier: SequentialModifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    pub fn modifier(&self) -> Option<&SequentialModifier> {
        self.modifier.as_ref()
    }

    pub fn rate(&self, store: &ResourceStore) -> Decimal {
        let base = self.base_rate.evaluate(store);
        let rate = match &self.modifier {
            Some(modifier) => modifier.apply(base, store),
            None => base,
        };
        rate.or_zero()
    }

    pub fn delta(&self, store: &ResourceStore, elapsed_seconds: f64) -> Decimal {
        let amount = (self.rate(store) * elapsed_seconds).or_zero();
        match self.kind {
            FlowKind::Produce => amount,
            FlowKind::Consume => -amount,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProductionRule {
    pub name: String,
    pub flows: Vec<Flow>,
}

impl ProductionRule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flows: Vec::new(),
        }
    }

    pub fn with_flow(mut self, flow: Flow) -> Self {
        self.flows.push(flow);
        self
    }

    pub fn deltas(
        &self,
        store: &ResourceStore,
        elapsed_seconds: f64,
    ) -> Vec<(ResourceId, Decimal)> {
        let mut deltas: Vec<(ResourceId, Decimal)> = Vec::with_capacity(self.flows.len());
        for flow in &self.flows {
            let delta = flow.delta(store, elapsed_seconds);
            match deltas.iter_mut().find(|(resource, _)| *resource == flow.resource) {
                Some((_, total)) => *total += delta,
                None => deltas.push((flow.resource, delta)),
            }
        }
        deltas
    }
}

#[derive(Debug, Clone)]
pub struct Layer {
    pub id: String,
    pub name: String,
    unlock: Condition,
    pub rules: Vec<ProductionRule>,
}

impl Layer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unlock: Condition::always(),
            rules: Vec::new(),
        }
    }

    pub fn unlocked_when(mut self, condition: impl Into<Condition>) -> Self {
        self.unlock = condition.into();
        self
    }

    pub fn with_rule(mut self, rule: ProductionRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn is_unlocked(&self, store: &ResourceStore) -> bool {
        self.unlock.evaluate(store)
    }
}
