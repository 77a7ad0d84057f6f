//! copingkit Settings Crate
//!
//! Loads, validates and saves the engine configuration.

pub mod config;
pub mod error;

pub use config::{Config, ConfigFormat, LayoutDefaults, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
