//! Configuration file errors.

use std::path::PathBuf;
use thiserror::Error;

/// Why a configuration file could not be loaded or saved.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config '{path}': {source}")]
    Read {
        /// Configuration file path.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be written.
    #[error("cannot write config '{path}': {source}")]
    Write {
        /// Configuration file path.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The text is not TOML or does not describe engine settings.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The settings could not be rendered as TOML.
    #[error("cannot encode config: {0}")]
    Encode(#[from] toml::ser::Error),

    /// The directory that holds the configuration file could not be created.
    #[error("cannot create config directory '{path}': {source}")]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Write {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// True when the configuration file does not exist.
    ///
    /// [`EngineConfig::load_or_default`](crate::EngineConfig::load_or_default)
    /// uses this to fall back to defaults for the user-level file.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConfigError::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
