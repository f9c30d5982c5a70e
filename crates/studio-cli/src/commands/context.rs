use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use studio_application::{PersonaStore, ThemeService};
use studio_core::clock::SystemClock;
use studio_core::config::AppConfig;
use studio_infrastructure::{
    ConfigService, FileKeyValueStore, KeyValueStore, KvPersonaRepository,
    KvPersonaVersionRepository, KvThemeRepository, StudioPaths,
};

/// Everything a command needs, wired against the file-backed store.
pub struct AppContext {
    pub config: AppConfig,
    pub store: PersonaStore,
    pub theme: ThemeService,
}

impl AppContext {
    pub async fn open(config_path: Option<PathBuf>, storage_path: Option<PathBuf>) -> Result<Self> {
        let config_service = match config_path {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new(),
        };
        let config = config_service.get_config();

        let storage_path = match storage_path.or_else(|| config.storage_file.clone()) {
            Some(path) => path,
            None => StudioPaths::storage_file().context("Failed to resolve storage file")?,
        };
        tracing::debug!("Using storage file {}", storage_path.display());

        let kv: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(storage_path));
        let store = PersonaStore::open(
            Arc::new(KvPersonaRepository::new(kv.clone())),
            Arc::new(KvPersonaVersionRepository::new(kv.clone())),
            Arc::new(SystemClock),
            config.share_base_url.clone(),
        )
        .await;
        let theme = ThemeService::new(Arc::new(KvThemeRepository::new(kv)));

        Ok(Self {
            config,
            store,
            theme,
        })
    }
}
