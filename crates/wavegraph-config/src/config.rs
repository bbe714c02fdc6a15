//! Engine configuration file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;
use wavegraph_nodes::ProcessSettings;

use crate::error::ConfigError;
use crate::paths::default_config_path;

/// Noise source settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Fixed seed for reproducible noise. Unset draws from entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Audio output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Output device name or index. Unset uses the system default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

/// Engine-wide defaults read by front ends.
///
/// Every table and key is optional; missing values take their defaults.
///
/// # TOML Format
///
/// ```toml
/// [export]
/// scale = 32767
/// play = false
/// export = true
/// path = "out/MySound.wav"
///
/// [noise]
/// seed = 42
///
/// [playback]
/// device = "pulse"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Defaults for the export sink.
    pub export: ProcessSettings,
    /// Noise source settings.
    pub noise: NoiseConfig,
    /// Audio output settings.
    pub playback: PlaybackConfig,
}

impl EngineConfig {
    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Loads `path`, or the platform default path when `None`.
    ///
    /// A missing file at the default path yields the defaults. An explicit
    /// path must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let path = default_config_path();
        match Self::load(&path) {
            Err(e) if e.is_not_found() => {
                tracing::debug!(path = %path.display(), "no configuration file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Save the configuration to a TOML file.
    ///
    /// Missing parent directories are created.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write(path, e))?;
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
