//! Appearance preferences stored next to the personas.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StudioError};

pub const DEFAULT_ACCENT_COLOR: &str = "#6366f1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    #[default]
    Light,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            other => Err(StudioError::validation(format!(
                "Unknown theme mode '{other}' (expected 'dark' or 'light')"
            ))),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePreferences {
    pub mode: ThemeMode,
    /// Any CSS colour string.
    pub accent_color: String,
}

impl Default for ThemePreferences {
    fn default() -> Self {
        Self {
            mode: ThemeMode::default(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
        }
    }
}

impl ThemePreferences {
    pub fn set_accent_color(&mut self, color: &str) -> Result<()> {
        let color = color.trim();
        if color.is_empty() {
            return Err(StudioError::validation("Accent color cannot be empty"));
        }
        self.accent_color = color.to_string();
        Ok(())
    }
}

/// Persistence for theme preferences. Missing values load as defaults.
#[async_trait::async_trait]
pub trait ThemeRepository: Send + Sync {
    async fn load(&self) -> Result<ThemePreferences>;
    async fn save(&self, preferences: &ThemePreferences) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_and_toggle() {
        assert_eq!("dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert!("blue".parse::<ThemeMode>().is_err());
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
    }

    #[test]
    fn test_accent_color_validation() {
        let mut prefs = ThemePreferences::default();
        assert!(prefs.set_accent_color("  ").is_err());
        prefs.set_accent_color(" #ff0000 ").unwrap();
        assert_eq!(prefs.accent_color, "#ff0000");
    }
}
