//! Tag vocabulary store backed by `tags.json`.

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::json_file::{load_list_or_empty, save_list};
use super::StoreError;
use crate::models::{merge_new_tags, NewTag, Tag};

/// Owns the tags file. Every operation reloads it from disk.
#[derive(Debug, Clone)]
pub struct TagStore {
    path: PathBuf,
}

impl TagStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored records as tags. Entries that are not objects are skipped.
    pub fn load(&self) -> Vec<Tag> {
        self.load_records()
            .iter()
            .filter_map(Tag::from_record)
            .collect()
    }

    fn load_records(&self) -> Vec<Value> {
        load_list_or_empty(&self.path)
    }

    /// Add candidates that are not already present and persist the list.
    ///
    /// Returns only the newly created tags; duplicates are skipped silently.
    /// Existing records are written back exactly as they were read, including
    /// ones that do not look like tags.
    pub fn add(&self, candidates: Vec<NewTag>) -> Result<Vec<Tag>, StoreError> {
        let mut records = self.load_records();
        let mut tags: Vec<Tag> = records.iter().filter_map(Tag::from_record).collect();
        let added = merge_new_tags(&mut tags, candidates).map_err(|source| {
            StoreError::IdSpaceExhausted {
                path: self.path.clone(),
                source,
            }
        })?;

        for tag in &added {
            let record = serde_json::to_value(tag).map_err(|source| StoreError::Serialize {
                path: self.path.clone(),
                source,
            })?;
            records.push(record);
        }
        save_list(&self.path, &records)?;

        tracing::info!("Added {} tag(s) to {}", added.len(), self.path.display());
        Ok(added)
    }

    /// Overwrite the tags file with the given records, unvalidated.
    pub fn replace_all(&self, records: &[Value]) -> Result<(), StoreError> {
        save_list(&self.path, records)
    }
}
