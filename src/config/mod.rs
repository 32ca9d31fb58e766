//! Configuration management for the compatibility probe

pub mod settings;
pub mod exchanges;

pub use settings::*;
pub use exchanges::*;

use lazy_static::lazy_static;

lazy_static! {
    pub static ref CONFIG: Config = Config::load();
}
