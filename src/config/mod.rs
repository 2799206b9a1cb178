//! Configuration Module
//!
//! Loads the converter's defaults from an optional settings file layered under
//! environment variables.

mod settings;
#[cfg(test)]
mod tests;

pub use crate::core::error::ConfigError;
pub use settings::{default_settings_path, ConfigResult, QuerySettings, ENV_PREFIX};
