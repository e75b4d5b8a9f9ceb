use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::core::{Computable, Condition, ResourceId, ResourceStore};
use crate::decimal::Decimal;
use crate::requirement::{
    RequirementReport, SharedRequirement, list_costs, max_requirements_met, pay_requirements,
    requirements_met,
};

use super::active::ActiveInstances;

pub type PurchaseHook = Arc<dyn Fn(Decimal, &mut ResourceStore) + Send + Sync>;

pub type InverseCost = Arc<dyn Fn(&ResourceStore) -> Decimal + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PurchaseState {
    Locked,
    Available,
    Purchasable,
    Maxed,
}

#[derive(Clone)]
pub struct Repeatable {
    pub id: String,
    pub display_name: String,
    count: ResourceId,
    requirements: Vec<SharedRequirement>,
    limit: Computable<Decimal>,
    visibility: Condition,
    buy_max: bool,
    free_levels: Computable<Decimal>,
    inverse_cost: Option<InverseCost>,
    active: Option<ActiveInstances>,
    on_purchase: Vec<PurchaseHook>,
}

impl Repeatable {
    pub fn new(id: impl Into<String>, count: ResourceId) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
            count,
            requirements: Vec::new(),
            limit: Decimal::INFINITY.into(),
            visibility: Condition::always(),
            buy_max: false,
            free_levels: Decimal::ZERO.into(),
            inverse_cost: None,
            active: None,
            on_purchase: Vec::new(),
        }
    }

    pub fn upgrade(id: impl Into<String>, count: ResourceId) -> Self {
        Self::new(id, count).with_limit(Decimal::ONE)
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn requiring(mut self, requirement: SharedRequirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    pub fn with_limit(mut self, limit: impl Into<Computable<Decimal>>) -> Self {
        self.limit = limit.into();
        self
    }

    pub fn visible_when(mut self, condition: impl Into<Condition>) -> Self {
        self.visibility = condition.into();
        self
    }

    pub fn buying_max(mut self, buy_max: bool) -> Self {
        self.buy_max = buy_max;
        self
    }

    pub fn with_free_levels(mut self, free_levels: impl Into<Computable<Decimal>>) -> Self {
        self.free_levels = free_levels.into();
        self
    }

    pub fn with_inverse_cost(
        mut self,
        inverse: impl Fn(&ResourceStore) -> Decimal + Send + Sync + 'static,
    ) -> Self {
        self.inverse_cost = Some(Arc::new(inverse));
        self
    }

    pub fn activates(mut self, active: ActiveInstances) -> Self {
        self.active = Some(active);
        self
    }

    pub fn on_purchase(
        mut self,
        hook: impl Fn(Decimal, &mut ResourceStore) + Send + Sync + 'static,
    ) -> Self {
        self.on_purchase.push(Arc::new(hook));
        self
    }

    pub fn count_resource(&self) -> ResourceId {
        self.count
    }

    pub fn requirements(&self) -> &[SharedRequirement] {
        &self.requirements
    }

    pub fn active(&self) -> Option<ActiveInstances> {
        self.active
    }

    pub fn amount(&self, store: &ResourceStore) -> Decimal {
        store.value(self.count)
    }

    pub fn free_levels(&self, store: &ResourceStore) -> Decimal {
        self.free_levels.evaluate(store).or_zero()
    }

    pub fn total_amount(&self, store: &ResourceStore) -> Decimal {
        self.amount(store) + self.free_levels(store)
    }

    pub fn limit(&self, store: &ResourceStore) -> Decimal {
        self.limit.evaluate(store)
    }

    pub fn is_visible(&self, store: &ResourceStore) -> bool {
        self.visibility.evaluate(store)
    }

    pub fn is_maxed(&self, store: &ResourceStore) -> bool {
        self.amount(store) >= self.limit(store)
    }

    pub fn is_bought(&self, store: &ResourceStore) -> bool {
        self.amount(store) >= Decimal::ONE
    }

    pub fn state(&self, store: &ResourceStore) -> PurchaseState {
        if !self.is_visible(store) {
            PurchaseState::Locked
        } else if self.is_maxed(store) {
            PurchaseState::Maxed
        } else if requirements_met(&self.requirements, store) {
            PurchaseState::Purchasable
        } else {
            PurchaseState::Available
        }
    }

    /// Units the next purchase would buy: one, or as many as every
    /// requirement and the limit allow when buying max.
    pub fn purchase_amount(&self, store: &ResourceStore) -> Decimal {
        let headroom = (self.limit(store) - self.amount(store)).floor().or_zero();
        let affordable = max_requirements_met(&self.requirements, store).floor();
        let mut amount = affordable.min(headroom).max(Decimal::ZERO);
        if !self.buy_max || !amount.is_finite() {
            amount = amount.min(Decimal::ONE);
        }
        amount
    }

    pub fn next_costs(&self, store: &ResourceStore) -> Vec<RequirementReport> {
        let amount = self.purchase_amount(store).max(Decimal::ONE);
        list_costs(&self.requirements, amount, store)
    }

    pub fn inverse_cost(&self, store: &ResourceStore) -> Option<Decimal> {
        self.inverse_cost.as_ref().map(|inverse| inverse(store).or_zero())
    }

    pub fn purchase(&self, store: &mut ResourceStore) -> Decimal {
        if self.state(store) != PurchaseState::Purchasable {
            return Decimal::ZERO;
        }
        let amount = self.purchase_amount(store);
        if amount < Decimal::ONE {
            return Decimal::ZERO;
        }

        pay_requirements(&self.requirements, amount, store);
        store.add(self.count, amount);
        if let Some(active) = self.active {
            active.add(store, amount);
        }
        for hook in &self.on_purchase {
            hook(amount, store);
        }

        debug!(
            repeatable = %self.id,
            %amount,
            owned = %self.amount(store),
            "purchase completed"
        );
        amount
    }
}

impl fmt::Debug for Repeatable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repeatable")
            .field("id", &self.id)
            .field("count", &self.count)
            .field("requirements", &self.requirements.len())
            .field("limit", &self.limit)
            .field("buy_max", &self.buy_max)
            .field("active", &self.active)
            .field("on_purchase", &self.on_purchase.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{PurchaseState, Repeatable};
    use crate::core::{Computable, Condition, ResourceStore};
    use crate::decimal::Decimal;
    use crate::model::ActiveInstances;
    use crate::requirement::{CostCurve, CostRequirement};

    fn lumberjack(store: &mut ResourceStore, logs: f64) -> Repeatable {
        let logs = store.register("logs", "Logs", Decimal::from(logs));
        let count = store.register("lumberjacks", "Lumberjacks", Decimal::ZERO);
        Repeatable::new("lumberjacks", count).requiring(Arc::new(CostRequirement::new(
            logs,
            CostCurve::geometric(10.0, 1.2, Computable::resource(count)),
        )))
    }

    #[test]
    fn single_purchase_pays_and_counts() {
        let mut store = ResourceStore::new();
        let repeatable = lumberjack(&mut store, 100.0);

        assert_eq!(repeatable.purchase(&mut store), Decimal::ONE);
        assert_eq!(repeatable.amount(&store), Decimal::ONE);
        assert_eq!(store.value_of("logs"), Some(Decimal::from(90.0)));
    }

    #[test]
    fn buy_max_takes_every_affordable_unit() {
        let mut store = ResourceStore::new();
        let repeatable = lumberjack(&mut store, 100.0).buying_max(true);

        assert_eq!(repeatable.purchase(&mut store), Decimal::from(6.0));
        let left = store.value_of("logs").expect("logs registered");
        assert!((left.to_f64() - (100.0 - 10.0 * (1.2f64.powi(6) - 1.0) / 0.2)).abs() < 1e-9);
        assert_eq!(repeatable.state(&store), PurchaseState::Available);
    }

    #[test]
    fn limit_caps_purchases_and_then_maxes() {
        let mut store = ResourceStore::new();
        let repeatable = lumberjack(&mut store, 1e6)
            .buying_max(true)
            .with_limit(4.0);

        assert_eq!(repeatable.purchase(&mut store), Decimal::from(4.0));
        assert_eq!(repeatable.state(&store), PurchaseState::Maxed);
        assert_eq!(repeatable.purchase(&mut store), Decimal::ZERO);
        assert_eq!(repeatable.amount(&store), Decimal::from(4.0));
    }

    #[test]
    fn locked_and_unaffordable_purchases_are_no_ops() {
        let mut store = ResourceStore::new();
        let day = store.register("day", "Day", Decimal::ONE);
        let repeatable = lumberjack(&mut store, 5.0).visible_when(Condition::at_least(day, 2.0));

        assert_eq!(repeatable.state(&store), PurchaseState::Locked);
        assert_eq!(repeatable.purchase(&mut store), Decimal::ZERO);

        store.set(day, Decimal::from(2.0));
        assert_eq!(repeatable.state(&store), PurchaseState::Available);
        assert_eq!(repeatable.purchase(&mut store), Decimal::ZERO);
        assert_eq!(store.value_of("logs"), Some(Decimal::from(5.0)));
    }

    #[test]
    fn upgrades_are_bought_once() {
        let mut store = ResourceStore::new();
        let coal = store.register("coal", "Coal", Decimal::from(100.0));
        let bought = store.register("coal_boxes", "Coal boxes", Decimal::ZERO);
        let upgrade = Repeatable::upgrade("coal_boxes", bought)
            .requiring(Arc::new(CostRequirement::new(coal, CostCurve::fixed(30.0))));

        assert!(!upgrade.is_bought(&store));
        assert_eq!(upgrade.purchase(&mut store), Decimal::ONE);
        assert!(upgrade.is_bought(&store));
        assert_eq!(upgrade.purchase(&mut store), Decimal::ZERO);
        assert_eq!(store.value(coal), Decimal::from(70.0));
    }

    #[test]
    fn costs_sharing_a_resource_are_paid_in_full_or_not_at_all() {
        let mut store = ResourceStore::new();
        let logs = store.register("logs", "Logs", Decimal::from(100.0));
        let huts = store.register("huts", "Huts", Decimal::ZERO);
        let hut = Repeatable::new("huts", huts)
            .buying_max(true)
            .requiring(Arc::new(CostRequirement::new(logs, CostCurve::fixed(60.0))))
            .requiring(Arc::new(CostRequirement::new(logs, CostCurve::fixed(60.0))));

        assert_eq!(hut.state(&store), PurchaseState::Available);
        assert_eq!(hut.purchase(&mut store), Decimal::ZERO);
        assert_eq!(store.value(logs), Decimal::from(100.0));
        assert_eq!(hut.amount(&store), Decimal::ZERO);

        store.set(logs, Decimal::from(300.0));
        assert_eq!(hut.purchase(&mut store), Decimal::from(2.0));
        assert_eq!(store.value(logs), Decimal::from(60.0));
    }

    #[test]
    fn hooks_run_after_the_count_changes() {
        let mut store = ResourceStore::new();
        let fires = store.register("small_fires", "Small fires", Decimal::ZERO);
        let active = store.register("small_fires_active", "Active", Decimal::ZERO);
        let warmth = store.register("warmth", "Warmth", Decimal::ZERO);
        let repeatable = Repeatable::new("small_fires", fires)
            .activates(ActiveInstances::new(fires, active))
            .on_purchase(move |amount, store| {
                let owned = store.value(fires);
                store.add(warmth, owned * amount);
            });

        assert_eq!(repeatable.purchase(&mut store), Decimal::ONE);
        assert_eq!(store.value(active), Decimal::ONE);
        assert_eq!(store.value(warmth), Decimal::ONE);
    }

    #[test]
    fn free_levels_add_to_the_total_only() {
        let mut store = ResourceStore::new();
        let repeatable = lumberjack(&mut store, 100.0).with_free_levels(3.0);
        repeatable.purchase(&mut store);

        assert_eq!(repeatable.amount(&store), Decimal::ONE);
        assert_eq!(repeatable.total_amount(&store), Decimal::from(4.0));
    }

    #[test]
    fn cost_listing_and_inverse_cost() {
        let mut store = ResourceStore::new();
        let repeatable = lumberjack(&mut store, 100.0).with_inverse_cost(|store| {
            let logs = store.value_of("logs").unwrap_or_default();
            Decimal::afford_geometric_series(logs, 10.0, 1.2, 0.0)
        });

        let costs = repeatable.next_costs(&store);
        assert_eq!(costs.len(), 1);
        assert!((costs[0].cost.to_f64() - 10.0).abs() < 1e-9);
        assert_eq!(repeatable.inverse_cost(&store), Some(Decimal::from(6.0)));
    }
}
