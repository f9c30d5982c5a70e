//! Key-value backed theme preferences.

use std::sync::Arc;

use crate::storage::{ACCENT_COLOR_KEY, DARK_MODE_KEY, KeyValueStore};
use studio_core::error::Result;
use studio_core::preferences::{ThemeMode, ThemePreferences, ThemeRepository};

/// Stores the theme mode and accent colour as raw strings, one key each.
pub struct KvThemeRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvThemeRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl ThemeRepository for KvThemeRepository {
    async fn load(&self) -> Result<ThemePreferences> {
        let mut preferences = ThemePreferences::default();

        if let Some(mode) = self.store.get(DARK_MODE_KEY)? {
            match mode.parse::<ThemeMode>() {
                Ok(mode) => preferences.mode = mode,
                Err(e) => tracing::warn!("Ignoring stored theme mode: {}", e),
            }
        }

        if let Some(color) = self.store.get(ACCENT_COLOR_KEY)? {
            if preferences.set_accent_color(&color).is_err() {
                tracing::warn!("Ignoring empty stored accent color");
            }
        }

        Ok(preferences)
    }

    async fn save(&self, preferences: &ThemePreferences) -> Result<()> {
        self.store.set(DARK_MODE_KEY, preferences.mode.as_str())?;
        self.store.set(ACCENT_COLOR_KEY, &preferences.accent_color)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryKeyValueStore;

    #[tokio::test]
    async fn test_defaults_when_empty() {
        let repo = KvThemeRepository::new(Arc::new(InMemoryKeyValueStore::new()));
        assert_eq!(repo.load().await.unwrap(), ThemePreferences::default());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let repo = KvThemeRepository::new(store.clone());

        let prefs = ThemePreferences {
            mode: ThemeMode::Dark,
            accent_color: "#10b981".to_string(),
        };
        repo.save(&prefs).await.unwrap();

        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(repo.load().await.unwrap(), prefs);
    }

    #[tokio::test]
    async fn test_invalid_stored_mode_falls_back() {
        let store = Arc::new(InMemoryKeyValueStore::with_entries([(DARK_MODE_KEY, "sepia")]));
        let repo = KvThemeRepository::new(store);
        assert_eq!(repo.load().await.unwrap().mode, ThemeMode::Light);
    }
}
