//! Exchange evaluation, report aggregation and run orchestration

pub mod evaluator;
pub mod report;
pub mod runner;

pub use evaluator::*;
pub use report::*;
pub use runner::*;
