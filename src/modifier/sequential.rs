use std::fmt;
use std::sync::Arc;

use crate::core::ResourceStore;
use crate::decimal::Decimal;

use super::{Modifier, ModifierReport};

/// Ordered chain folded front to back by `apply` and back to front by
/// `invert`. Chains nest, since a chain is itself a [`Modifier`].
#[derive(Clone, Default)]
pub struct SequentialModifier {
    modifiers: Vec<Arc<dyn Modifier>>,
}

impl SequentialModifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, modifier: impl Modifier + 'static) -> Self {
        self.push(modifier);
        self
    }

    pub fn push(&mut self, modifier: impl Modifier + 'static) {
        self.modifiers.push(Arc::new(modifier));
    }

    pub fn push_shared(&mut self, modifier: Arc<dyn Modifier>) {
        self.modifiers.push(modifier);
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }
}

impl Modifier for SequentialModifier {
    fn apply(&self, value: Decimal, store: &ResourceStore) -> Decimal {
        self.modifiers
            .iter()
            .fold(value, |acc, modifier| modifier.apply(acc, store))
    }

    fn invert(&self, value: Decimal, store: &ResourceStore) -> Decimal {
        self.modifiers
            .iter()
            .rev()
            .fold(value, |acc, modifier| modifier.invert(acc, store))
    }

    fn is_enabled(&self, store: &ResourceStore) -> bool {
        self.modifiers
            .iter()
            .any(|modifier| modifier.is_enabled(store))
    }

    fn describe(&self, store: &ResourceStore) -> Vec<ModifierReport> {
        self.modifiers
            .iter()
            .flat_map(|modifier| modifier.describe(store))
            .collect()
    }
}

impl fmt::Debug for SequentialModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequentialModifier")
            .field("len", &self.modifiers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::SequentialModifier;
    use crate::core::{Condition, ResourceStore};
    use crate::decimal::Decimal;
    use crate::modifier::{Modifier, Transform, TransformKind};

    fn assert_relative(actual: Decimal, expected: f64) {
        let scale = expected.abs().max(1.0);
        assert!(
            (actual.to_f64() - expected).abs() <= 1e-9 * scale,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn order_matters() {
        let store = ResourceStore::new();
        let add_then_double = SequentialModifier::new()
            .with(Transform::additive(3.0))
            .with(Transform::multiplicative(2.0));
        let double_then_add = SequentialModifier::new()
            .with(Transform::multiplicative(2.0))
            .with(Transform::additive(3.0));

        assert_eq!(add_then_double.apply(Decimal::from(5.0), &store), Decimal::from(16.0));
        assert_eq!(double_then_add.apply(Decimal::from(5.0), &store), Decimal::from(13.0));
    }

    #[test]
    fn invert_reverses_apply_for_every_enabled_combination() {
        let mut store = ResourceStore::new();
        let flags: Vec<_> = (0..4)
            .map(|index| store.register(format!("flag_{index}"), "Flag", Decimal::ZERO))
            .collect();

        let chain = SequentialModifier::new()
            .with(Transform::additive(4.0).enabled_when(Condition::positive(flags[0])))
            .with(Transform::multiplicative(1.5).enabled_when(Condition::positive(flags[1])))
            .with(
                Transform::exponential(1.3)
                    .supporting_low_numbers()
                    .enabled_when(Condition::positive(flags[2])),
            )
            .with(Transform::exponential(0.8).enabled_when(Condition::positive(flags[3])));

        for mask in 0u32..16 {
            for (bit, flag) in flags.iter().enumerate() {
                let on = if mask & (1 << bit) != 0 { 1.0 } else { 0.0 };
                store.set(*flag, Decimal::from(on));
            }
            for base in [0.25, 1.0, 12.0, 5000.0] {
                let applied = chain.apply(Decimal::from(base), &store);
                assert_relative(chain.invert(applied, &store), base);
            }
        }
    }

    #[test]
    fn chain_is_enabled_when_any_member_is() {
        let mut store = ResourceStore::new();
        let flag = store.register("flag", "Flag", Decimal::ZERO);
        let chain = SequentialModifier::new()
            .with(Transform::additive(1.0).enabled_when(Condition::positive(flag)))
            .with(Transform::multiplicative(2.0).enabled_when(false));

        assert!(!chain.is_enabled(&store));
        store.set(flag, Decimal::ONE);
        assert!(chain.is_enabled(&store));
        assert!(SequentialModifier::new().is_empty());
    }

    #[test]
    fn nested_chains_flatten_their_reports() {
        let store = ResourceStore::new();
        let inner: Arc<dyn Modifier> = Arc::new(
            SequentialModifier::new()
                .with(Transform::multiplicative(2.0).with_description("Sharp axes"))
                .with(Transform::exponential(1.1)),
        );
        let mut outer = SequentialModifier::new().with(Transform::additive(1.0));
        outer.push_shared(Arc::clone(&inner));

        let before = outer.apply(Decimal::from(10.0), &store);
        let report = outer.describe(&store);
        let after = outer.apply(Decimal::from(10.0), &store);

        assert_eq!(before, after);
        assert_eq!(report.len(), 3);
        assert_eq!(report[0].description, "+1");
        assert_eq!(report[1].description, "Sharp axes");
        assert_eq!(
            report[2].kind,
            TransformKind::Exponential {
                support_low_numbers: false
            }
        );
        assert_relative(before, 22f64.powf(1.1));
    }
}
