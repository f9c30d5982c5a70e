//! Reading import files and writing export files.

use std::fs;
use std::path::{Path, PathBuf};

use studio_core::error::{Result, StudioError};

/// Import files larger than this are rejected before parsing.
pub const MAX_IMPORT_BYTES: u64 = 1024 * 1024;

/// Reads a persona import file after the size and type checks.
///
/// The file must be at most 1 MB and its MIME type, guessed from the
/// extension, must be `application/json`.
pub fn read_import_file(path: &Path) -> Result<String> {
    if !is_json_file(path) {
        return Err(StudioError::validation(format!(
            "{} is not a JSON file",
            path.display()
        )));
    }

    let metadata = fs::metadata(path)?;
    if metadata.len() > MAX_IMPORT_BYTES {
        return Err(StudioError::validation(format!(
            "{} is {} bytes; imports are limited to 1 MB",
            path.display(),
            metadata.len()
        )));
    }

    tracing::debug!("Reading persona import file {}", path.display());
    Ok(fs::read_to_string(path)?)
}

/// Writes an export into `dir`, creating it if needed, and returns the path.
pub fn write_export_file(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let path = dir.join(file_name);
    fs::write(&path, contents)?;
    tracing::info!("Exported persona to {}", path.display());
    Ok(path)
}

fn is_json_file(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .is_some_and(|mime| mime.essence_str() == "application/json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("persona.json");
        fs::write(&path, r#"{"name":"A"}"#).unwrap();
        assert_eq!(read_import_file(&path).unwrap(), r#"{"name":"A"}"#);
    }

    #[test]
    fn test_rejects_non_json_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("persona.txt");
        fs::write(&path, r#"{"name":"A"}"#).unwrap();
        let err = read_import_file(&path).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_extension_case_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("persona.JSON");
        fs::write(&path, r#"{"name":"A"}"#).unwrap();
        assert!(read_import_file(&path).is_ok());
    }

    #[test]
    fn test_rejects_missing_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("persona");
        fs::write(&path, r#"{"name":"A"}"#).unwrap();
        assert!(read_import_file(&path).unwrap_err().is_validation());
    }

    #[test]
    fn test_rejects_oversized_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("big.json");
        fs::write(&path, vec![b' '; (MAX_IMPORT_BYTES + 1) as usize]).unwrap();
        let err = read_import_file(&path).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_write_export_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_export_file(&temp_dir.path().join("out"), "a.json", "{}").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "{}");
    }
}
