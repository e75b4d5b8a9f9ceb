use crate::core::{Computable, Condition, ResourceStore};
use crate::decimal::Decimal;

use super::{Modifier, ModifierReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Additive,
    Multiplicative,
    /// With `support_low_numbers` the value is shifted by one around the
    /// power, `(x + 1)^e - 1`, so inputs below one still grow.
    Exponential { support_low_numbers: bool },
}

/// One step of a modifier chain. Disabled transforms pass values through.
#[derive(Debug, Clone)]
pub struct Transform {
    kind: TransformKind,
    amount: Computable<Decimal>,
    enabled: Condition,
    description: Option<String>,
}

impl Transform {
    pub fn new(kind: TransformKind, amount: impl Into<Computable<Decimal>>) -> Self {
        Self {
            kind,
            amount: amount.into(),
            enabled: Condition::always(),
            description: None,
        }
    }

    pub fn additive(addend: impl Into<Computable<Decimal>>) -> Self {
        Self::new(TransformKind::Additive, addend)
    }

    pub fn multiplicative(multiplier: impl Into<Computable<Decimal>>) -> Self {
        Self::new(TransformKind::Multiplicative, multiplier)
    }

    pub fn exponential(exponent: impl Into<Computable<Decimal>>) -> Self {
        Self::new(
            TransformKind::Exponential {
                support_low_numbers: false,
            },
            exponent,
        )
    }

    pub fn supporting_low_numbers(mut self) -> Self {
        if let TransformKind::Exponential { .. } = self.kind {
            self.kind = TransformKind::Exponential {
                support_low_numbers: true,
            };
        }
        self
    }

    pub fn enabled_when(mut self, condition: impl Into<Condition>) -> Self {
        self.enabled = condition.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    pub fn amount(&self, store: &ResourceStore) -> Decimal {
        self.amount.evaluate(store)
    }

    fn default_description(&self, amount: Decimal) -> String {
        match self.kind {
            TransformKind::Additive => format!("+{amount}"),
            TransformKind::Multiplicative => format!("x{amount}"),
            TransformKind::Exponential { .. } => format!("^{amount}"),
        }
    }
}

impl Modifier for Transform {
    fn apply(&self, value: Decimal, store: &ResourceStore) -> Decimal {
        if !self.is_enabled(store) {
            return value;
        }
        let amount = self.amount(store);
        match self.kind {
            TransformKind::Additive => value + amount,
            TransformKind::Multiplicative => value * amount,
            TransformKind::Exponential {
                support_low_numbers: false,
            } => value.pow(amount),
            TransformKind::Exponential {
                support_low_numbers: true,
            } => (value + 1.0).pow(amount) - 1.0,
        }
    }

    fn invert(&self, value: Decimal, store: &ResourceStore) -> Decimal {
        if !self.is_enabled(store) {
            return value;
        }
        let amount = self.amount(store);
        match self.kind {
            TransformKind::Additive => value - amount,
            TransformKind::Multiplicative => value / amount,
            TransformKind::Exponential {
                support_low_numbers: false,
            } => value.root(amount),
            TransformKind::Exponential {
                support_low_numbers: true,
            } => (value + 1.0).root(amount) - 1.0,
        }
    }

    fn is_enabled(&self, store: &ResourceStore) -> bool {
        self.enabled.evaluate(store)
    }

    fn describe(&self, store: &ResourceStore) -> Vec<ModifierReport> {
        let value = self.amount(store);
        vec![ModifierReport {
            description: self
                .description
                .clone()
                .unwrap_or_else(|| self.default_description(value)),
            kind: self.kind,
            enabled: self.is_enabled(store),
            value,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::{Transform, TransformKind};
    use crate::core::{Computable, Condition, ResourceStore};
    use crate::decimal::Decimal;
    use crate::modifier::Modifier;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: Decimal, expected: f64) {
        assert!(
            (actual.to_f64() - expected).abs() <= EPSILON * expected.abs().max(1.0),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn each_kind_applies_and_inverts() {
        let store = ResourceStore::new();
        let cases = [
            (Transform::additive(5.0), 17.0),
            (Transform::multiplicative(2.5), 30.0),
            (Transform::exponential(2.0), 144.0),
            (Transform::exponential(2.0).supporting_low_numbers(), 168.0),
        ];
        for (transform, expected) in cases {
            let applied = transform.apply(Decimal::from(12.0), &store);
            assert_close(applied, expected);
            assert_close(transform.invert(applied, &store), 12.0);
        }
    }

    #[test]
    fn low_number_support_keeps_small_values_growing() {
        let store = ResourceStore::new();
        let plain = Transform::exponential(2.0);
        let shifted = Transform::exponential(2.0).supporting_low_numbers();

        let small = Decimal::from(0.5);
        assert!(plain.apply(small, &store) < small);
        assert!(shifted.apply(small, &store) > small);
        assert_close(shifted.apply(small, &store), 1.25);
    }

    #[test]
    fn disabled_transforms_pass_through() {
        let mut store = ResourceStore::new();
        let boxes = store.register("coal_boxes", "Coal boxes", Decimal::ZERO);
        let doubler = Transform::multiplicative(2.0).enabled_when(Condition::positive(boxes));

        assert_eq!(doubler.apply(Decimal::from(7.0), &store), Decimal::from(7.0));
        assert_eq!(doubler.invert(Decimal::from(7.0), &store), Decimal::from(7.0));

        store.set(boxes, Decimal::ONE);
        assert_eq!(doubler.apply(Decimal::from(7.0), &store), Decimal::from(14.0));
    }

    #[test]
    fn zero_multiplier_inverts_to_nan() {
        let store = ResourceStore::new();
        let zero = Transform::multiplicative(0.0);
        assert!(zero.invert(Decimal::from(3.0), &store).is_nan());
        assert!(zero.invert(Decimal::from(3.0), &store).or_zero().is_zero());
    }

    #[test]
    fn dynamic_amounts_are_read_per_call() {
        let mut store = ResourceStore::new();
        let fires = store.register("fires", "Fires", Decimal::from(2.0));
        let bonus = Transform::additive(Computable::scaled(fires, 10.0, 0.0))
            .with_description("Fire warmth");

        assert_eq!(bonus.apply(Decimal::ONE, &store), Decimal::from(21.0));
        store.set(fires, Decimal::from(3.0));
        assert_eq!(bonus.apply(Decimal::ONE, &store), Decimal::from(31.0));

        let report = bonus.describe(&store);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].description, "Fire warmth");
        assert_eq!(report[0].kind, TransformKind::Additive);
        assert_eq!(report[0].value, Decimal::from(30.0));
        assert!(report[0].enabled);
    }
}
