use crate::core::{ResourceId, ResourceStore};
use crate::decimal::Decimal;

/// Pairs a built count with how many of those units are switched on.
/// The active counter always stays within `0..=owned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveInstances {
    pub owned: ResourceId,
    pub active: ResourceId,
}

impl ActiveInstances {
    pub fn new(owned: ResourceId, active: ResourceId) -> Self {
        Self { owned, active }
    }

    pub fn owned(&self, store: &ResourceStore) -> Decimal {
        store.value(self.owned)
    }

    pub fn active(&self, store: &ResourceStore) -> Decimal {
        store.value(self.active)
    }

    pub fn inactive(&self, store: &ResourceStore) -> Decimal {
        (self.owned(store) - self.active(store)).max(Decimal::ZERO)
    }

    pub fn add(&self, store: &mut ResourceStore, amount: impl Into<Decimal>) {
        self.shift(store, amount.into());
    }

    pub fn remove(&self, store: &mut ResourceStore, amount: impl Into<Decimal>) {
        let amount: Decimal = amount.into();
        self.shift(store, -amount);
    }

    pub fn max(&self, store: &mut ResourceStore) {
        let owned = self.owned(store);
        store.set(self.active, owned.max(Decimal::ZERO));
    }

    pub fn min(&self, store: &mut ResourceStore) {
        store.set(self.active, Decimal::ZERO);
    }

    fn shift(&self, store: &mut ResourceStore, amount: Decimal) {
        let target = (self.active(store) + amount.or_zero())
            .max(Decimal::ZERO)
            .min(self.owned(store));
        store.set(self.active, target);
    }
}
