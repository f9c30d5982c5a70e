//! Unified path management for Persona Studio files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/persona-studio/        # Config directory
//! └── config.toml                  # Application configuration
//!
//! ~/.local/share/persona-studio/   # Data directory
//! └── storage.json                 # Key-value store (personas, versions, theme)
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "persona-studio";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config/data directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for studio_core::StudioError {
    fn from(err: PathError) -> Self {
        studio_core::StudioError::config(err.to_string())
    }
}

/// Unified path management for Persona Studio.
pub struct StudioPaths;

impl StudioPaths {
    /// Returns the configuration directory (e.g. `~/.config/persona-studio/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the data directory (e.g. `~/.local/share/persona-studio/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default key-value storage file.
    pub fn storage_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("storage.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file() {
        if let Ok(path) = StudioPaths::config_file() {
            assert!(path.ends_with("persona-studio/config.toml"));
        }
    }

    #[test]
    fn test_storage_file() {
        if let Ok(path) = StudioPaths::storage_file() {
            assert!(path.ends_with("persona-studio/storage.json"));
        }
    }
}
