//! Configuration for the wavegraph engine.
//!
//! This crate holds the defaults a front end applies before running a graph:
//! export sink settings, an optional fixed noise seed, and the playback
//! device. Configuration is stored as TOML in the platform config directory.
//!
//! # Example
//!
//! ```rust,no_run
//! use wavegraph_config::{EngineConfig, default_config_path};
//!
//! // Missing default file falls back to defaults
//! let mut config = EngineConfig::load_or_default(None).unwrap();
//!
//! config.noise.seed = Some(42);
//! config.export.play = false;
//! config.save(default_config_path()).unwrap();
//! ```

mod config;
mod error;

/// Platform-specific configuration paths.
pub mod paths;

pub use config::{EngineConfig, NoiseConfig, PlaybackConfig};
pub use error::ConfigError;
pub use paths::{CONFIG_FILE_NAME, default_config_path, ensure_user_config_dir, user_config_dir};
