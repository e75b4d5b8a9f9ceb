//! Composable value transforms. A rate or cost is written as a base value
//! pushed through an ordered chain of modifiers; the same chain can be run
//! backwards to answer "what base would reach this target".

mod sequential;
mod transform;

pub use sequential::SequentialModifier;
pub use transform::{Transform, TransformKind};

use crate::core::ResourceStore;
use crate::decimal::Decimal;

pub trait Modifier: Send + Sync {
    fn apply(&self, value: Decimal, store: &ResourceStore) -> Decimal;

    /// Reverses [`apply`](Modifier::apply) under the enabled set seen now.
    fn invert(&self, value: Decimal, store: &ResourceStore) -> Decimal;

    fn is_enabled(&self, store: &ResourceStore) -> bool;

    fn describe(&self, store: &ResourceStore) -> Vec<ModifierReport>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModifierReport {
    pub description: String,
    pub kind: TransformKind,
    pub enabled: bool,
    pub value: Decimal,
}
