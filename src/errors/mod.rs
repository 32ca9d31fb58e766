//! Error types and their mapping onto probe outcomes

pub mod compat_error;

pub use compat_error::*;
