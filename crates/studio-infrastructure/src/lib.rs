pub mod config_service;
pub mod dto;
pub mod kv_persona_repository;
pub mod kv_theme_repository;
pub mod paths;
pub mod persona_file;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::kv_persona_repository::{KvPersonaRepository, KvPersonaVersionRepository};
pub use crate::kv_theme_repository::KvThemeRepository;
pub use crate::paths::StudioPaths;
pub use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
