//! File-backed key-value storage with ACID guarantees.
//!
//! Stands in for browser local storage: a single JSON object mapping keys to
//! string values. Every write is a locked read-modify-write of the whole
//! document followed by an atomic rename.

use serde_json::{Map, Value as JsonValue};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};

/// A key-value file storage.
///
/// Responsibilities:
/// - **File locking** (exclusive write lock)
/// - **Atomic read/write** (tmp file + atomic rename)
///
/// Does NOT:
/// - Know about specific entities (personas, versions, theme)
/// - Parse the stored values (delegated to repositories)
///
/// Two processes writing the same key still race; the lock only keeps the
/// file itself consistent. Last write wins.
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a new storage handle.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the JSON document (created on first write)
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the whole document.
    ///
    /// A missing or empty file is an empty document.
    fn load_document(&self) -> Result<Map<String, JsonValue>, StorageError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<JsonValue>(&content)? {
            JsonValue::Object(map) => Ok(map),
            _ => Err(StorageError::Corrupted(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    /// Writes the whole document atomically.
    fn save_document(&self, document: &Map<String, JsonValue>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json_string = serde_json::to_string_pretty(document)?;

        // Write to temporary file in the same directory
        let tmp_path = self.get_temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json_string.as_bytes())?;

        // Ensure data is written to disk
        tmp_file.sync_all()?;
        drop(tmp_file);

        // Atomic rename
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Performs a transactional update with file locking.
    fn update<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Map<String, JsonValue>),
    {
        let _lock = FileLock::acquire(&self.path)?;
        let mut document = self.load_document()?;
        f(&mut document);
        self.save_document(&document)
    }

    /// Gets a temporary file path for atomic writes.
    fn get_temp_path(&self) -> Result<PathBuf, StorageError> {
        let file_name = self.path.file_name().ok_or_else(|| {
            StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let document = self.load_document()?;
        Ok(document
            .get(key)
            .and_then(JsonValue::as_str)
            .map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|document| {
            document.insert(key.to_string(), JsonValue::String(value.to_string()));
        })
    }
}

/// A file lock guard that automatically releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    /// Acquires an exclusive lock next to the given path.
    fn acquire(path: &Path) -> Result<Self, StorageError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| StorageError::Lock(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock is automatic when the file handle is dropped
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("storage.json"));

        store.set("bolt-diy-dark-mode", "dark").unwrap();
        store.set("bolt_diy_saved_personas", "[]").unwrap();

        assert_eq!(store.get("bolt-diy-dark-mode").unwrap().as_deref(), Some("dark"));
        assert_eq!(store.get("bolt_diy_saved_personas").unwrap().as_deref(), Some("[]"));
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_nonexistent_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("nested/storage.json"));
        assert!(store.get("anything").unwrap().is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("storage.json"));
        store.set("k", "v").unwrap();
        store.set("k", "w").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("w"));
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        FileKeyValueStore::new(path.clone()).set("k", "v").unwrap();
        let reopened = FileKeyValueStore::new(path);
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_corrupted_document_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        let store = FileKeyValueStore::new(path);
        assert!(store.get("k").is_err());
    }

    #[test]
    fn test_no_temp_or_lock_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("storage.json"));
        store.set("k", "v").unwrap();

        let names: Vec<String> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["storage.json".to_string()]);
    }
}
