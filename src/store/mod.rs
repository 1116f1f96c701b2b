//! File-backed stores for tags, aliases and the output log.
//!
//! Each store owns one JSON file and reloads it on every operation; nothing
//! is cached between calls. There is no locking, so two writers touching
//! the same file concurrently can lose an update.

mod aliases;
mod json_file;
mod output;
mod suggest;
mod tags;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::IdSpaceExhausted;

pub use aliases::{AliasMap, AliasStore};
pub use json_file::{load_list_or_empty, save_list};
pub use output::{rewrite_tag_references, OutputLog, TAGS_FIELD};
pub use suggest::{suggest, DEFAULT_SUGGESTION_LIMIT};
pub use tags::TagStore;

pub const OUTPUT_FILE: &str = "output.json";
pub const TAGS_FILE: &str = "tags.json";
pub const ALIASES_FILE: &str = "aliases.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to serialize {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot allocate a tag id in {}: {source}", path.display())]
    IdSpaceExhausted {
        path: PathBuf,
        #[source]
        source: IdSpaceExhausted,
    },
}

/// The three stores living in one assets directory.
#[derive(Debug, Clone)]
pub struct Assets {
    dir: PathBuf,
    pub tags: TagStore,
    pub aliases: AliasStore,
    pub output: OutputLog,
}

impl Assets {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            tags: TagStore::new(dir.join(TAGS_FILE)),
            aliases: AliasStore::new(dir.join(ALIASES_FILE)),
            output: OutputLog::new(dir.join(OUTPUT_FILE)),
            dir,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create any missing store file as an empty list.
    ///
    /// Existing files are left untouched. Returns the paths that were created.
    pub fn init(&self) -> Result<Vec<PathBuf>, StoreError> {
        let mut created = Vec::new();
        for path in [self.output.path(), self.tags.path(), self.aliases.path()] {
            if !path.exists() {
                save_list::<serde_json::Value>(path, &[])?;
                created.push(path.to_path_buf());
            }
        }
        Ok(created)
    }

    /// Rerun alias propagation with the persisted aliases and tags.
    pub fn propagate_aliases(&self) -> Result<usize, StoreError> {
        let map = AliasMap::build(&self.aliases.load(), &self.tags.load());
        self.output.apply_aliases(&map)
    }

    /// Prefix suggestions drawn from the current tags and aliases.
    pub fn suggest(&self, query: &str, category: Option<&str>, limit: usize) -> Vec<String> {
        suggest(&self.tags.load(), &self.aliases.load(), query, category, limit)
    }
}
