use std::fmt;
use std::sync::Arc;

use crate::decimal::Decimal;

use super::resource_store::{ResourceId, ResourceStore};

pub type Evaluator<T> = Arc<dyn Fn(&ResourceStore) -> T + Send + Sync>;

/// A value that is either fixed or recomputed from the current resource
/// snapshot every time it is read.
pub enum Computable<T> {
    Constant(T),
    Dynamic(Evaluator<T>),
}

/// Enable predicates, visibility checks and unlock gates.
pub type Condition = Computable<bool>;

impl<T: Clone> Computable<T> {
    pub fn dynamic(evaluator: impl Fn(&ResourceStore) -> T + Send + Sync + 'static) -> Self {
        Self::Dynamic(Arc::new(evaluator))
    }

    pub fn evaluate(&self, store: &ResourceStore) -> T {
        match self {
            Self::Constant(value) => value.clone(),
            Self::Dynamic(evaluator) => evaluator(store),
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }
}

impl Computable<Decimal> {
    /// `resource * factor + offset`, read live.
    pub fn scaled(
        resource: ResourceId,
        factor: impl Into<Decimal>,
        offset: impl Into<Decimal>,
    ) -> Self {
        let factor = factor.into();
        let offset = offset.into();
        Self::dynamic(move |store| store.value(resource) * factor + offset)
    }

    pub fn resource(resource: ResourceId) -> Self {
        Self::dynamic(move |store| store.value(resource))
    }
}

impl Condition {
    pub fn always() -> Self {
        Self::Constant(true)
    }

    pub fn never() -> Self {
        Self::Constant(false)
    }

    /// Holds while `resource >= threshold`.
    pub fn at_least(resource: ResourceId, threshold: impl Into<Decimal>) -> Self {
        let threshold = threshold.into();
        Self::dynamic(move |store| store.value(resource) >= threshold)
    }

    /// Holds while `resource > 0`.
    pub fn positive(resource: ResourceId) -> Self {
        Self::dynamic(move |store| store.value(resource) > Decimal::ZERO)
    }
}

impl<T: Clone> Clone for Computable<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Constant(value) => Self::Constant(value.clone()),
            Self::Dynamic(evaluator) => Self::Dynamic(Arc::clone(evaluator)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Computable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl<T> From<T> for Computable<T> {
    fn from(value: T) -> Self {
        Self::Constant(value)
    }
}

impl From<f64> for Computable<Decimal> {
    fn from(value: f64) -> Self {
        Self::Constant(Decimal::from_f64(value))
    }
}
