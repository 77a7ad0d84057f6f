//! Engine configuration
//!
//! A [`Config`] holds the engine tunables ([`CopingParams`]) and the layout
//! defaults a host starts from. It is stored as JSON or TOML, picked by file
//! extension, and validated on every load and save.

use std::path::{Path, PathBuf};

use copingkit_core::{
    CopingParams, Error, LayoutError, MeasurementSystem, PaverConfig, PaverOption,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Directory name under the platform config directory
pub const CONFIG_DIR_NAME: &str = "copingkit";
/// Default config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// On-disk format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Format for `path`, or an error for anything but `.json`/`.toml`.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Defaults applied when a host starts a new layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LayoutDefaults {
    /// Paver preset for new layouts
    pub paver_option: PaverOption,
    /// Units used when formatting measurements
    pub measurement_system: MeasurementSystem,
}

/// Complete engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Engine tunables
    #[serde(default)]
    pub coping: CopingParams,
    /// Layout defaults
    #[serde(default)]
    pub defaults: LayoutDefaults,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Paver sizes for the default preset, `None` when coping is disabled.
    pub fn paver_config(&self) -> Option<PaverConfig> {
        self.defaults.paver_option.paver_config()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| SettingsError::SaveError(format!("Invalid TOML: {}", e)))?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        info!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Load `path` when it exists, otherwise fall back to defaults.
    ///
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// `<config dir>/copingkit/config.toml` for the current platform
    pub fn default_config_path() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                ConfigError::UnsupportedPlatform("no config directory available".to_string())
            })
    }

    /// Validate configuration
    ///
    /// Ranges are owned by [`CopingParams::validate`]; a rejected parameter
    /// is reported under its `coping.` key.
    pub fn validate(&self) -> SettingsResult<()> {
        self.coping.validate().map_err(|e| match e {
            Error::Layout(LayoutError::InvalidParameter { name, value, .. }) => {
                SettingsError::from(ConfigError::ValueOutOfRange {
                    key: format!("coping.{}", name),
                    value: value.to_string(),
                })
            }
            other => SettingsError::InvalidSetting {
                key: "coping".to_string(),
                reason: other.to_string(),
            },
        })
    }
}
