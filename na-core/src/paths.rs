//! Platform-specific locations for config and log files.

use std::path::PathBuf;

use crate::constants::APP_NAME;
use crate::error::{NaError, NaResult};

/// Get the platform-specific configuration directory.
///
/// - Windows: `%APPDATA%/naapi`
/// - macOS: `~/Library/Application Support/naapi`
/// - Linux: `~/.config/naapi`
pub fn config_dir() -> NaResult<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| NaError::Config("could not determine config directory".into()))?;
    Ok(base.join(APP_NAME))
}

/// Get the platform-specific data directory (log files live here).
pub fn data_dir() -> NaResult<PathBuf> {
    let base = dirs::data_dir()
        .ok_or_else(|| NaError::Config("could not determine data directory".into()))?;
    Ok(base.join(APP_NAME))
}

/// Default location of `config.toml`.
pub fn default_config_path() -> NaResult<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Default directory for rotated log files.
pub fn default_log_dir() -> NaResult<PathBuf> {
    Ok(data_dir()?.join("logs"))
}
