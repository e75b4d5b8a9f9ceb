mod computable;
mod resource_store;
mod simulation;

pub use computable::{Computable, Condition, Evaluator};
pub use resource_store::{Resource, ResourceId, ResourceStore};
pub use simulation::{Simulation, TickPhase, TickSummary};
