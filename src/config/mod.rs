//! Configuration data structures for outbreak setups.

mod parameters;
mod settings;

pub use parameters::{DelayDistribution, OffspringDistribution, Parameters};
pub use settings::{Settings, SettingsError};
