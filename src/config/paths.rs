//! Platform-specific configuration paths.

use crate::constants::APP_NAME;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Get the configuration directory for the current platform.
///
/// - Linux: `~/.config/hyphy-run/`
/// - macOS: `~/Library/Application Support/hyphy-run/`
/// - Windows: `%APPDATA%\hyphy-run\`
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_contains_app_name() {
        let path = config_dir().unwrap();
        assert!(path.to_string_lossy().contains("hyphy-run"));
    }

    #[test]
    fn test_config_file_path_ends_with_toml() {
        let path = config_file_path().unwrap();
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }
}
