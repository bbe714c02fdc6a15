//! Platform-specific configuration paths.
//!
//! - Linux: `~/.config/wavegraph/wavegraph.toml`
//! - macOS: `~/Library/Application Support/wavegraph/wavegraph.toml`
//! - Windows: `%APPDATA%\wavegraph\wavegraph.toml`

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "wavegraph";

/// File name of the engine configuration.
pub const CONFIG_FILE_NAME: &str = "wavegraph.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a path relative to the working directory if the platform config
/// directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path [`EngineConfig::load_or_default`](crate::EngineConfig::load_or_default)
/// reads when no explicit file is given.
pub fn default_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE_NAME)
}

/// Ensure the user config directory exists.
///
/// Creates the directory and any parent directories if they don't exist.
pub fn ensure_user_config_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_config_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    }

    Ok(dir)
}
