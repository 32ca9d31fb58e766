//! HTTP transport for the REST probes

pub mod client;

pub use client::*;
