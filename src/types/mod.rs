//! Core data types and structures

pub mod exchange;
pub mod status;
pub mod results;
pub mod report;

pub use exchange::*;
pub use status::*;
pub use results::*;
pub use report::*;
