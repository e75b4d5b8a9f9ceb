use std::fmt;
use std::sync::Arc;

use crate::core::{Computable, Condition, ResourceId, ResourceStore};
use crate::decimal::Decimal;

use super::{Requirement, RequirementReport};

pub type CostFn = Arc<dyn Fn(Decimal, &ResourceStore) -> Decimal + Send + Sync>;

#[derive(Clone)]
pub enum CostCurve {
    Fixed(Computable<Decimal>),
    /// The `k`-th unit past `owned` costs `base * ratio^(owned + k)`.
    Geometric {
        base: Computable<Decimal>,
        ratio: Computable<Decimal>,
        owned: Computable<Decimal>,
    },
    /// Content-supplied curve with no closed-form inverse; buys one at a time.
    Custom(CostFn),
}

impl CostCurve {
    pub fn fixed(cost: impl Into<Computable<Decimal>>) -> Self {
        Self::Fixed(cost.into())
    }

    pub fn geometric(
        base: impl Into<Computable<Decimal>>,
        ratio: impl Into<Computable<Decimal>>,
        owned: impl Into<Computable<Decimal>>,
    ) -> Self {
        Self::Geometric {
            base: base.into(),
            ratio: ratio.into(),
            owned: owned.into(),
        }
    }

    pub fn custom(
        cost: impl Fn(Decimal, &ResourceStore) -> Decimal + Send + Sync + 'static,
    ) -> Self {
        Self::Custom(Arc::new(cost))
    }

    pub fn cost_for(&self, amount: Decimal, store: &ResourceStore) -> Decimal {
        match self {
            Self::Fixed(cost) => cost.evaluate(store) * amount,
            Self::Geometric { base, ratio, owned } => Decimal::sum_geometric_series(
                amount,
                base.evaluate(store),
                ratio.evaluate(store),
                owned.evaluate(store),
            ),
            Self::Custom(cost) => cost(amount, store),
        }
    }

    pub fn amount_affordable(&self, balance: Decimal, store: &ResourceStore) -> Decimal {
        match self {
            Self::Fixed(cost) => {
                let cost = cost.evaluate(store).or_zero();
                if cost <= Decimal::ZERO {
                    return Decimal::INFINITY;
                }
                (balance / cost).floor().max(Decimal::ZERO).or_zero()
            }
            Self::Geometric { base, ratio, owned } => Decimal::afford_geometric_series(
                balance,
                base.evaluate(store),
                ratio.evaluate(store),
                owned.evaluate(store),
            ),
            Self::Custom(cost) => {
                if cost(Decimal::ONE, store).or_zero() <= balance {
                    Decimal::ONE
                } else {
                    Decimal::ZERO
                }
            }
        }
    }
}

impl fmt::Debug for CostCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(cost) => f.debug_tuple("Fixed").field(cost).finish(),
            Self::Geometric { base, ratio, owned } => f
                .debug_struct("Geometric")
                .field("base", base)
                .field("ratio", ratio)
                .field("owned", owned)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CostRequirement {
    resource: ResourceId,
    curve: CostCurve,
    requires_pay: bool,
    can_maximize: bool,
    visibility: Condition,
}

impl CostRequirement {
    pub fn new(resource: ResourceId, curve: CostCurve) -> Self {
        Self {
            resource,
            curve,
            requires_pay: true,
            can_maximize: true,
            visibility: Condition::always(),
        }
    }

    pub fn without_payment(mut self) -> Self {
        self.requires_pay = false;
        self
    }

    pub fn without_maximize(mut self) -> Self {
        self.can_maximize = false;
        self
    }

    pub fn visible_when(mut self, condition: impl Into<Condition>) -> Self {
        self.visibility = condition.into();
        self
    }

    pub fn curve(&self) -> &CostCurve {
        &self.curve
    }
}

impl Requirement for CostRequirement {
    fn resource(&self) -> Option<ResourceId> {
        Some(self.resource)
    }

    fn is_visible(&self, store: &ResourceStore) -> bool {
        self.visibility.evaluate(store)
    }

    fn requires_pay(&self) -> bool {
        self.requires_pay
    }

    fn can_maximize(&self) -> bool {
        self.can_maximize
    }

    fn amount_affordable(&self, store: &ResourceStore) -> Decimal {
        self.curve
            .amount_affordable(store.value(self.resource), store)
    }

    fn cost_for(&self, amount: Decimal, store: &ResourceStore) -> Decimal {
        self.curve.cost_for(amount, store).or_zero()
    }

    fn pay(&self, amount: Decimal, store: &mut ResourceStore) {
        let cost = self.cost_for(amount, store);
        store.spend(self.resource, cost);
    }

    fn describe(&self, store: &ResourceStore) -> RequirementReport {
        let name = store
            .get(self.resource)
            .map(|resource| resource.display_name.clone());
        let cost = self.cost_for(Decimal::ONE, store);
        RequirementReport {
            description: match &name {
                Some(name) => format!("{cost} {name}"),
                None => cost.to_string(),
            },
            resource: name,
            cost,
            met: self.amount_affordable(store) >= Decimal::ONE,
            visible: self.is_visible(store),
            requires_pay: self.requires_pay,
        }
    }
}
