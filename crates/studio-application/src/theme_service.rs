//! Theme preference use cases.

use std::sync::Arc;

use studio_core::error::Result;
use studio_core::preferences::{ThemeMode, ThemePreferences, ThemeRepository};

pub struct ThemeService {
    repository: Arc<dyn ThemeRepository>,
}

impl ThemeService {
    pub fn new(repository: Arc<dyn ThemeRepository>) -> Self {
        Self { repository }
    }

    pub async fn preferences(&self) -> Result<ThemePreferences> {
        self.repository.load().await
    }

    pub async fn set_mode(&self, mode: ThemeMode) -> Result<ThemePreferences> {
        let mut preferences = self.repository.load().await?;
        preferences.mode = mode;
        self.repository.save(&preferences).await?;
        tracing::debug!("Theme mode set to {}", mode);
        Ok(preferences)
    }

    /// Flips between dark and light.
    pub async fn toggle_mode(&self) -> Result<ThemePreferences> {
        let current = self.repository.load().await?.mode;
        self.set_mode(current.toggled()).await
    }

    pub async fn set_accent_color(&self, color: &str) -> Result<ThemePreferences> {
        let mut preferences = self.repository.load().await?;
        preferences.set_accent_color(color)?;
        self.repository.save(&preferences).await?;
        Ok(preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryTheme(Mutex<ThemePreferences>);

    #[async_trait::async_trait]
    impl ThemeRepository for MemoryTheme {
        async fn load(&self) -> Result<ThemePreferences> {
            Ok(self.0.lock().unwrap().clone())
        }

        async fn save(&self, preferences: &ThemePreferences) -> Result<()> {
            *self.0.lock().unwrap() = preferences.clone();
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_toggle_and_accent() {
        let service = ThemeService::new(Arc::new(MemoryTheme::default()));
        assert_eq!(service.toggle_mode().await.unwrap().mode, ThemeMode::Dark);
        assert_eq!(service.toggle_mode().await.unwrap().mode, ThemeMode::Light);

        let prefs = service.set_accent_color("#10b981").await.unwrap();
        assert_eq!(prefs.accent_color, "#10b981");
        assert!(service.set_accent_color(" ").await.is_err());
        assert_eq!(service.preferences().await.unwrap().accent_color, "#10b981");
    }
}
