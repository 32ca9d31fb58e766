//! Request parameter defaults and response schema validation

pub mod params;
pub mod schema;

pub use params::*;
pub use schema::*;
