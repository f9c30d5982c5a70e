//! Application configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer; every field has a
//! default so a missing or partial file is fine.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SHARE_BASE_URL: &str = "http://localhost:5173/";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Origin (and path) shareable links are built on.
    pub share_base_url: String,
    /// Key-value storage file; defaults to the platform data directory.
    pub storage_file: Option<PathBuf>,
    pub response: ResponseConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
            storage_file: None,
            response: ResponseConfig::default(),
        }
    }
}

/// Simulated "thinking" delay before a reply is produced.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ResponseConfig {
    pub base_delay_ms: u64,
    /// Upper bound of the random extra delay.
    pub jitter_ms: u64,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 1000,
            jitter_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
share_base_url = "https://studio.example.com/"

[response]
jitter_ms = 0
"#,
        )
        .unwrap();
        assert_eq!(config.share_base_url, "https://studio.example.com/");
        assert_eq!(config.response.base_delay_ms, 1000);
        assert_eq!(config.response.jitter_ms, 0);
        assert!(config.storage_file.is_none());
    }
}
