//! Storage layer: key-value stores backing the repositories.

mod kv_storage;
mod memory_storage;

pub use kv_storage::FileKeyValueStore;
pub use memory_storage::InMemoryKeyValueStore;

/// Saved personas, a JSON array.
pub const SAVED_PERSONAS_KEY: &str = "bolt_diy_saved_personas";
/// Version histories, a JSON object keyed by persona id.
pub const PERSONA_VERSIONS_KEY: &str = "bolt_diy_persona_versions";
/// `"dark"` or `"light"`, stored raw.
pub const DARK_MODE_KEY: &str = "bolt-diy-dark-mode";
/// CSS colour string, stored raw.
pub const ACCENT_COLOR_KEY: &str = "bolt-diy-accent-color";

/// Errors that can occur during storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// File I/O error.
    Io(std::io::Error),
    /// JSON conversion error.
    Json(serde_json::Error),
    /// The document exists but is not a key-value object.
    Corrupted(String),
    /// Locking error.
    Lock(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {}", e),
            StorageError::Json(e) => write!(f, "JSON error: {}", e),
            StorageError::Corrupted(e) => write!(f, "Corrupted storage: {}", e),
            StorageError::Lock(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Json(e)
    }
}

impl From<StorageError> for studio_core::StudioError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Io(io) => io.into(),
            StorageError::Json(json) => json.into(),
            other => studio_core::StudioError::data_access(other.to_string()),
        }
    }
}

/// A synchronous string key-value store, the shape of browser local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
