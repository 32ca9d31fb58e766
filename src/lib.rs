//! Exchange Compatibility Probe - scheduled health check for exchange APIs
//!
//! Exercises each configured exchange's public REST and streaming surfaces,
//! samples latency, discovers rate limits, validates response shapes, and
//! rolls everything into a JSON report so breaking API changes show up here
//! before they reach trading code.

pub mod config;
pub mod types;
pub mod errors;
pub mod network;
pub mod validation;
pub mod probes;
pub mod evaluation;
pub mod storage;
pub mod utils;

// Re-export commonly used items
pub use config::{Config, ProbeTimings, CONFIG};
pub use errors::{CompatError, CompatResult};
pub use evaluation::{run_all, ExchangeEvaluator};
pub use types::*;
