//! Alias store backed by `aliases.json`, plus the propagation sweep.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::json_file::{load_list_or_empty, save_list};
use super::output::OutputLog;
use super::tags::TagStore;
use super::StoreError;
use crate::models::{normalize, Alias, Tag};

/// Normalized alias string to the canonical display string of its tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    entries: HashMap<String, String>,
}

impl AliasMap {
    /// Resolve aliases through the tag list.
    ///
    /// Aliases pointing at an unknown id (or at a tag without display text)
    /// are left out.
    pub fn build(aliases: &[Alias], tags: &[Tag]) -> Self {
        let lookup: HashMap<String, &str> = tags
            .iter()
            .filter_map(|t| t.string.as_deref().map(|s| (t.id.to_string(), s)))
            .collect();

        let mut entries = HashMap::new();
        for alias in aliases {
            match lookup.get(alias.id.as_str()) {
                Some(canonical) if !canonical.is_empty() => {
                    entries.insert(normalize(&alias.alias), canonical.to_string());
                }
                _ => {
                    tracing::debug!("Alias {:?} points at unknown tag {}", alias.alias, alias.id);
                }
            }
        }

        Self { entries }
    }

    /// Canonical string for an already-normalized key.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Owns the aliases file.
#[derive(Debug, Clone)]
pub struct AliasStore {
    path: PathBuf,
}

impl AliasStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Vec<Alias> {
        load_list_or_empty(&self.path)
    }

    /// Replace the alias list, then sweep the output log.
    ///
    /// The aliases file is written before the sweep starts; a failure while
    /// rewriting the log does not roll it back. Returns the number of tag
    /// references updated.
    pub fn save_and_propagate(
        &self,
        aliases: &[Alias],
        tags: &TagStore,
        output: &OutputLog,
    ) -> Result<usize, StoreError> {
        save_list(&self.path, aliases)?;

        let map = AliasMap::build(aliases, &tags.load());
        let updated = output.apply_aliases(&map)?;

        tracing::info!(
            "Saved {} alias(es), updated {} tag reference(s)",
            aliases.len(),
            updated
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TagId;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    struct Fixture {
        _dir: tempfile::TempDir,
        tags: TagStore,
        aliases: AliasStore,
        output: OutputLog,
    }

    fn fixture(tags: Value, output: Value) -> Fixture {
        let dir = tempdir().unwrap();
        let tag_path = dir.path().join("tags.json");
        let output_path = dir.path().join("output.json");
        std::fs::write(&tag_path, tags.to_string()).unwrap();
        std::fs::write(&output_path, output.to_string()).unwrap();

        Fixture {
            tags: TagStore::new(tag_path),
            aliases: AliasStore::new(dir.path().join("aliases.json")),
            output: OutputLog::new(output_path),
            _dir: dir,
        }
    }

    #[test]
    fn test_build_drops_unresolved() {
        let tags = vec![Tag::new(TagId::Standard(1), "vocab", "Cat")];
        let aliases = vec![Alias::new(" Kitty ", "1"), Alias::new("ghost", "99")];

        let map = AliasMap::build(&aliases, &tags);

        assert_eq!(map.len(), 1);
        assert_eq!(map.resolve("kitty"), Some("Cat"));
        assert_eq!(map.resolve("ghost"), None);
    }

    #[test]
    fn test_build_matches_custom_ids() {
        let tags = vec![Tag::new(TagId::custom(3), "custom", "Mine")];
        let map = AliasMap::build(&[Alias::new("my", "x3")], &tags);
        assert_eq!(map.resolve("my"), Some("Mine"));
    }

    #[test]
    fn test_unresolved_duplicate_does_not_shadow() {
        let tags = vec![Tag::new(TagId::Standard(1), "vocab", "Cat")];
        let aliases = vec![Alias::new("kitty", "1"), Alias::new("KITTY", "404")];
        let map = AliasMap::build(&aliases, &tags);
        assert_eq!(map.resolve("kitty"), Some("Cat"));
    }

    #[test]
    fn test_propagate_vocab_reference() {
        let fx = fixture(
            json!([{ "id": 5, "category": "vocab", "string": "NewName" }]),
            json!([{ "Tags": [{ "string": "vocab: oldname" }] }]),
        );

        let updated = fx
            .aliases
            .save_and_propagate(&[Alias::new("oldname", "5")], &fx.tags, &fx.output)
            .unwrap();

        assert_eq!(updated, 1);
        assert_eq!(fx.output.load()[0]["Tags"][0]["string"], "vocab: NewName");
        assert_eq!(fx.aliases.load(), vec![Alias::new("oldname", "5")]);
    }

    #[test]
    fn test_propagate_twice_reports_zero() {
        let fx = fixture(
            json!([{ "id": 2, "category": "predefined", "string": "Dog" }]),
            json!([{ "Tags": [{ "string": "doggo" }, { "string": "vocab: pup" }] }]),
        );
        let aliases = vec![Alias::new("doggo", "2"), Alias::new("pup", "2")];

        let first = fx
            .aliases
            .save_and_propagate(&aliases, &fx.tags, &fx.output)
            .unwrap();
        let after_first = fx.output.load();
        let second = fx
            .aliases
            .save_and_propagate(&aliases, &fx.tags, &fx.output)
            .unwrap();

        assert_eq!(first, 2);
        assert_eq!(second, 0);
        assert_eq!(fx.output.load(), after_first);
    }

    #[test]
    fn test_propagate_with_missing_tags_file() {
        let dir = tempdir().unwrap();
        let output = OutputLog::new(dir.path().join("output.json"));
        output.append(json!({ "Tags": [{ "string": "kitty" }] })).unwrap();
        let aliases = AliasStore::new(dir.path().join("aliases.json"));

        let updated = aliases
            .save_and_propagate(
                &[Alias::new("kitty", "1")],
                &TagStore::new(dir.path().join("tags.json")),
                &output,
            )
            .unwrap();

        assert_eq!(updated, 0);
        assert_eq!(aliases.load().len(), 1);
    }
}
