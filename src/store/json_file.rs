//! Whole-file JSON persistence for the asset stores.
//!
//! Every store keeps a single JSON array on disk and rewrites it in full.
//! Reads follow one recovery policy: a missing, empty, unreadable or
//! unparseable file loads as an empty list. The corrupt content is
//! overwritten by the next successful write.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use super::StoreError;

/// Load a JSON array, treating a missing or unparseable file as empty.
pub fn load_list_or_empty<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            tracing::warn!("Could not read {}, treating as empty: {}", path.display(), e);
            return Vec::new();
        }
    };

    if content.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str(&content) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(
                "Could not parse {}, treating as empty: {}",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}

/// Write a list as pretty-printed JSON, replacing the file in full.
///
/// Content goes to a temporary file in the target directory first and is
/// renamed over the target, so a failed write leaves the old file intact.
pub fn save_list<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(items).map_err(|source| StoreError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    let write_err = |source: std::io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(write_err)?;

    let mut file = NamedTempFile::new_in(parent).map_err(write_err)?;
    file.write_all(content.as_bytes()).map_err(write_err)?;
    file.as_file().sync_all().map_err(write_err)?;
    file.persist(path).map_err(|e| write_err(e.error))?;

    tracing::debug!("Wrote {} entries to {}", items.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let items: Vec<Value> = load_list_or_empty(&dir.path().join("absent.json"));
        assert!(items.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[{\"id\": 1,").unwrap();
        let items: Vec<Value> = load_list_or_empty(&path);
        assert!(items.is_empty());
    }

    #[test]
    fn test_wrong_shape_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("object.json");
        std::fs::write(&path, "{\"not\": \"a list\"}").unwrap();
        let items: Vec<Value> = load_list_or_empty(&path);
        assert!(items.is_empty());
    }

    #[test]
    fn test_save_format_is_two_space_and_unescaped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        save_list(&path, &[json!({ "b": "café", "a": 1 })]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "[\n  {\n    \"b\": \"café\",\n    \"a\": 1\n  }\n]");
    }

    #[test]
    fn test_save_empty_list() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.json");
        save_list::<Value>(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }
}
