//! Configuration service implementation.
//!
//! Loads the application configuration from `config.toml`
//! (`~/.config/persona-studio/config.toml` unless overridden).

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::paths::StudioPaths;
use studio_core::config::AppConfig;
use studio_core::error::{Result, StudioError};

/// Configuration service that loads and caches the application configuration.
///
/// A missing file yields the defaults; an unreadable or invalid file is
/// logged and also yields the defaults.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a service for the default config path.
    pub fn new() -> Self {
        Self {
            path: StudioPaths::config_file().ok(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service for a custom config path (CLI override, tests).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> AppConfig {
        if let Ok(cached) = self.config.read() {
            if let Some(config) = cached.as_ref() {
                return config.clone();
            }
        }

        let loaded = match self.load_config() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load configuration, using defaults: {}", e);
                AppConfig::default()
            }
        };

        if let Ok(mut cache) = self.config.write() {
            *cache = Some(loaded.clone());
        }

        loaded
    }

    fn load_config(&self) -> Result<AppConfig> {
        let Some(path) = self.path.as_ref() else {
            return Err(StudioError::config("Cannot determine config directory"));
        };

        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        assert_eq!(service.get_config(), AppConfig::default());
    }

    #[test]
    fn test_loads_and_caches() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "share_base_url = \"https://a.example/\"\n").unwrap();

        let service = ConfigService::with_path(path.clone());
        assert_eq!(service.get_config().share_base_url, "https://a.example/");

        fs::write(&path, "share_base_url = \"https://b.example/\"\n").unwrap();
        assert_eq!(service.get_config().share_base_url, "https://a.example/");
    }

    #[test]
    fn test_invalid_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "share_base_url = [").unwrap();
        let service = ConfigService::with_path(path);
        assert_eq!(service.get_config(), AppConfig::default());
    }
}
