use std::collections::HashMap;

use crate::decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(usize);

impl ResourceId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub key: String,
    pub display_name: String,
    pub value: Decimal,
    pub total: Decimal,
    pub tick_delta: Decimal,
}

impl Resource {
    fn new(key: String, display_name: String, value: Decimal) -> Self {
        Self {
            key,
            display_name,
            value,
            total: Decimal::ZERO,
            tick_delta: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceStore {
    resources: Vec<Resource>,
    by_key: HashMap<String, ResourceId>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        key: impl Into<String>,
        display_name: impl Into<String>,
        initial: impl Into<Decimal>,
    ) -> ResourceId {
        let key = key.into();
        if let Some(id) = self.by_key.get(&key) {
            return *id;
        }
        let id = ResourceId(self.resources.len());
        self.by_key.insert(key.clone(), id);
        self.resources
            .push(Resource::new(key, display_name.into(), initial.into()));
        id
    }

    pub fn id(&self, key: &str) -> Option<ResourceId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(id.0)
    }

    pub fn get_mut(&mut self, id: ResourceId) -> Option<&mut Resource> {
        self.resources.get_mut(id.0)
    }

    pub fn value(&self, id: ResourceId) -> Decimal {
        self.get(id)
            .map(|resource| resource.value)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn value_of(&self, key: &str) -> Option<Decimal> {
        self.id(key).map(|id| self.value(id))
    }

    pub fn set(&mut self, id: ResourceId, value: Decimal) {
        if let Some(resource) = self.get_mut(id) {
            resource.value = value;
        }
    }

    pub fn begin_tick(&mut self) {
        for resource in &mut self.resources {
            resource.tick_delta = Decimal::ZERO;
        }
    }

    /// Applies a signed change; gains also count towards the lifetime total.
    pub fn add(&mut self, id: ResourceId, amount: Decimal) {
        let amount = amount.or_zero();
        if amount.is_zero() {
            return;
        }
        let Some(resource) = self.get_mut(id) else {
            return;
        };
        resource.value += amount;
        resource.tick_delta += amount;
        if amount > Decimal::ZERO {
            resource.total += amount;
        }
    }

    /// Removes up to `amount`, never going below zero. Returns what was taken.
    pub fn spend(&mut self, id: ResourceId, amount: Decimal) -> Decimal {
        let amount = amount.or_zero();
        if amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let Some(resource) = self.get_mut(id) else {
            return Decimal::ZERO;
        };
        let spent = amount.min(resource.value.max(Decimal::ZERO));
        if spent > Decimal::ZERO {
            resource.value -= spent;
            resource.tick_delta -= spent;
        }
        spent
    }

    /// Raises the cell to `floor` when it sits below it.
    pub fn clamp_min(&mut self, id: ResourceId, floor: Decimal) {
        if let Some(resource) = self.get_mut(id) {
            if resource.value.is_nan() || resource.value < floor {
                resource.value = floor;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceId, &Resource)> {
        self.resources
            .iter()
            .enumerate()
            .map(|(index, resource)| (ResourceId(index), resource))
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::ResourceStore;
    use crate::decimal::Decimal;

    #[test]
    fn register_is_idempotent_per_key() {
        let mut store = ResourceStore::new();
        let logs = store.register("logs", "Logs", Decimal::from(5.0));
        let again = store.register("logs", "Other", Decimal::from(99.0));
        assert_eq!(logs, again);
        assert_eq!(store.len(), 1);
        assert_eq!(store.value(logs), Decimal::from(5.0));
        assert_eq!(store.value_of("logs"), Some(Decimal::from(5.0)));
        assert_eq!(store.value_of("coal"), None);
    }

    #[test]
    fn add_tracks_totals_and_tick_deltas() {
        let mut store = ResourceStore::new();
        let coal = store.register("coal", "Coal", Decimal::ZERO);

        store.begin_tick();
        store.add(coal, Decimal::from(10.0));
        store.add(coal, Decimal::from(-4.0));
        store.add(coal, Decimal::NAN);

        let resource = store.get(coal).expect("coal registered");
        assert_eq!(resource.value, Decimal::from(6.0));
        assert_eq!(resource.total, Decimal::from(10.0));
        assert_eq!(resource.tick_delta, Decimal::from(6.0));

        store.begin_tick();
        assert_eq!(store.get(coal).expect("coal").tick_delta, Decimal::ZERO);
    }

    #[test]
    fn spend_never_goes_negative() {
        let mut store = ResourceStore::new();
        let logs = store.register("logs", "Logs", Decimal::from(30.0));

        assert_eq!(store.spend(logs, Decimal::from(12.0)), Decimal::from(12.0));
        assert_eq!(store.spend(logs, Decimal::from(100.0)), Decimal::from(18.0));
        assert_eq!(store.value(logs), Decimal::ZERO);
        assert_eq!(store.spend(logs, Decimal::from(-5.0)), Decimal::ZERO);
    }

    #[test]
    fn clamp_min_floors_counters() {
        let mut store = ResourceStore::new();
        let active = store.register("fires_active", "Active fires", Decimal::from(-1.0));
        store.clamp_min(active, Decimal::ZERO);
        assert_eq!(store.value(active), Decimal::ZERO);
    }
}
