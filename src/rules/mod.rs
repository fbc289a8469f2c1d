//! Birth/survival rules and the generation step

pub mod evaluator;
pub mod laboratory;
pub mod spec;

pub use evaluator::RuleEvaluator;
pub use laboratory::{ZoneLayout, ZoneRule};
pub use spec::{NeighborSet, RuleSpec};
