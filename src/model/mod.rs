mod active;
mod layer;
mod repeatable;

pub use active::ActiveInstances;
pub use layer::{Flow, FlowKind, Layer, ProductionRule};
pub use repeatable::{InverseCost, PurchaseHook, PurchaseState, Repeatable};
