use tracing::{trace, warn};

use crate::decimal::Decimal;
use crate::model::{Layer, PurchaseState, Repeatable};

use super::resource_store::ResourceStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TickPhase {
    #[default]
    Idle,
    Applying,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub applied_rules: usize,
    pub starved_rules: usize,
    pub locked_layers: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Simulation {
    pub resources: ResourceStore,
    layers: Vec<Layer>,
    repeatables: Vec<Repeatable>,
    pub paused: bool,
    pub tick_index: u64,
    pub elapsed_seconds: f64,
    phase: TickPhase,
}

impl Simulation {
    pub fn new(resources: ResourceStore) -> Self {
        Self {
            resources,
            ..Self::default()
        }
    }

    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn add_repeatable(&mut self, repeatable: Repeatable) {
        self.repeatables.push(repeatable);
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn repeatables(&self) -> &[Repeatable] {
        &self.repeatables
    }

    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub fn repeatable(&self, id: &str) -> Option<&Repeatable> {
        self.repeatables.iter().find(|repeatable| repeatable.id == id)
    }

    pub fn phase(&self) -> TickPhase {
        self.phase
    }

    pub fn purchase_state(&self, id: &str) -> Option<PurchaseState> {
        self.repeatable(id)
            .map(|repeatable| repeatable.state(&self.resources))
    }

    pub fn purchase(&mut self, id: &str) -> Decimal {
        let Some(repeatable) = self.repeatables.iter().find(|repeatable| repeatable.id == id)
        else {
            warn!(repeatable = id, "purchase requested for unknown repeatable");
            return Decimal::ZERO;
        };
        repeatable.purchase(&mut self.resources)
    }

    pub fn tick(&mut self, elapsed_seconds: f64) -> TickSummary {
        self.resources.begin_tick();
        if self.paused {
            return TickSummary::default();
        }

        let elapsed = if elapsed_seconds.is_finite() && elapsed_seconds >= 0.0 {
            elapsed_seconds
        } else {
            warn!(elapsed_seconds, "ignoring invalid elapsed time");
            0.0
        };

        self.phase = TickPhase::Applying;
        self.tick_index += 1;
        self.elapsed_seconds += elapsed;

        let summary = self.integrate_layers(elapsed);
        self.clamp_active_counters();

        self.phase = TickPhase::Idle;
        summary
    }

    /// Rates read the pre-tick snapshot. Starvation checks read live
    /// balances, so a later layer sees what earlier layers already burned.
    fn integrate_layers(&mut self, elapsed: f64) -> TickSummary {
        let snapshot = self.resources.clone();
        let mut summary = TickSummary::default();

        for layer in &self.layers {
            if !layer.is_unlocked(&snapshot) {
                summary.locked_layers += 1;
                continue;
            }

            for rule in &layer.rules {
                let deltas = rule.deltas(&snapshot, elapsed);
                let starved = deltas.iter().find(|(resource, delta)| {
                    *delta < Decimal::ZERO && -*delta > self.resources.value(*resource)
                });
                if let Some((resource, delta)) = starved {
                    let needed = -*delta;
                    trace!(
                        layer = %layer.id,
                        rule = %rule.name,
                        resource = resource.index(),
                        %needed,
                        "rule starved; skipping this tick"
                    );
                    summary.starved_rules += 1;
                    continue;
                }

                for (resource, delta) in deltas {
                    self.resources.add(resource, delta);
                }
                summary.applied_rules += 1;
            }
        }
        summary
    }

    fn clamp_active_counters(&mut self) {
        for active in self.repeatables.iter().filter_map(Repeatable::active) {
            self.resources.clamp_min(active.active, Decimal::ZERO);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Simulation, TickPhase};
    use crate::core::{Computable, Condition, ResourceStore};
    use crate::decimal::Decimal;
    use crate::model::{ActiveInstances, Flow, Layer, ProductionRule, Repeatable};

    fn assert_same_state(lhs: &Simulation, rhs: &Simulation) {
        assert_eq!(lhs.tick_index, rhs.tick_index);
        assert_eq!(lhs.resources, rhs.resources);
    }

    fn campfire(logs: f64) -> Simulation {
        let mut store = ResourceStore::new();
        let logs = store.register("logs", "Logs", Decimal::from(logs));
        let coal = store.register("coal", "Coal", Decimal::ZERO);
        let fires = store.register("fires_active", "Active fires", Decimal::ONE);

        let mut sim = Simulation::new(store);
        sim.add_layer(
            Layer::new("coal", "Coal").with_rule(
                ProductionRule::new("burn")
                    .with_flow(Flow::consume(logs, Computable::scaled(fires, 1000.0, 0.0)))
                    .with_flow(Flow::produce(coal, Computable::scaled(fires, 0.1, 0.0))),
            ),
        );
        sim
    }

    #[test]
    fn starved_rules_leave_every_resource_untouched() {
        let mut sim = campfire(500.0);
        let summary = sim.tick(1.0);

        assert_eq!(summary.starved_rules, 1);
        assert_eq!(sim.resources.value_of("logs"), Some(Decimal::from(500.0)));
        assert_eq!(sim.resources.value_of("coal"), Some(Decimal::ZERO));
    }

    #[test]
    fn fed_rules_apply_every_flow() {
        let mut sim = campfire(50000.0);
        let summary = sim.tick(1.0);

        assert_eq!(summary.applied_rules, 1);
        assert_eq!(sim.resources.value_of("logs"), Some(Decimal::from(49000.0)));
        assert_eq!(sim.resources.value_of("coal"), Some(Decimal::from(0.1)));
        assert_eq!(sim.tick_index, 1);
        assert_eq!(sim.phase(), TickPhase::Idle);
    }

    #[test]
    fn locked_layers_do_not_integrate() {
        let mut store = ResourceStore::new();
        let day = store.register("day", "Day", Decimal::ONE);
        let ash = store.register("ash", "Ash", Decimal::ZERO);
        let mut sim = Simulation::new(store);
        sim.add_layer(
            Layer::new("ash", "Ash")
                .unlocked_when(Condition::at_least(day, 2.0))
                .with_rule(ProductionRule::new("settle").with_flow(Flow::produce(ash, 5.0))),
        );

        assert_eq!(sim.tick(1.0).locked_layers, 1);
        assert_eq!(sim.resources.value(ash), Decimal::ZERO);

        sim.resources.set(day, Decimal::from(2.0));
        sim.tick(1.0);
        assert_eq!(sim.resources.value(ash), Decimal::from(5.0));
    }

    #[test]
    fn invalid_elapsed_time_counts_as_zero() {
        let mut sim = campfire(50000.0);
        sim.tick(-3.0);
        sim.tick(f64::NAN);
        assert_eq!(sim.resources.value_of("logs"), Some(Decimal::from(50000.0)));
        assert_eq!(sim.tick_index, 2);
        assert_eq!(sim.elapsed_seconds, 0.0);
    }

    #[test]
    fn paused_simulation_does_not_advance() {
        let mut sim = campfire(50000.0);
        sim.paused = true;
        sim.tick(1.0);
        assert_eq!(sim.tick_index, 0);
        assert_eq!(sim.resources.value_of("logs"), Some(Decimal::from(50000.0)));
    }

    #[test]
    fn active_counters_are_floored_after_the_tick() {
        let mut store = ResourceStore::new();
        let owned = store.register("fires", "Fires", Decimal::from(2.0));
        let active = store.register("fires_active", "Active fires", Decimal::ONE);
        let mut sim = Simulation::new(store);
        sim.add_repeatable(
            Repeatable::new("fires", owned).activates(ActiveInstances::new(owned, active)),
        );
        sim.add_layer(
            Layer::new("embers", "Embers").with_rule(
                ProductionRule::new("die down").with_flow(Flow::consume(active, 0.0)),
            ),
        );

        sim.resources.set(active, Decimal::from(-0.5));
        sim.tick(1.0);
        assert_eq!(sim.resources.value(active), Decimal::ZERO);
    }

    #[test]
    fn repeated_ticks_are_deterministic() {
        let mut a = campfire(1e6);
        let mut b = a.clone();

        for _ in 0..64 {
            a.tick(0.25);
            b.tick(0.25);
            assert_same_state(&a, &b);
        }
    }

    #[test]
    fn unknown_purchases_are_no_ops() {
        let mut sim = campfire(500.0);
        assert_eq!(sim.purchase("nothing"), Decimal::ZERO);
        assert_eq!(sim.purchase_state("nothing"), None);
    }
}
