//! Output log backed by `output.json`.

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::aliases::AliasMap;
use super::json_file::{load_list_or_empty, save_list};
use super::StoreError;
use crate::models::ReferenceKey;

/// Field of an output record holding its tag references.
pub const TAGS_FIELD: &str = "Tags";

/// Append-only log of annotated records, rewritten in full on every change.
#[derive(Debug, Clone)]
pub struct OutputLog {
    path: PathBuf,
}

impl OutputLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Vec<Value> {
        load_list_or_empty(&self.path)
    }

    /// Push one record to the end of the log.
    pub fn append(&self, record: Value) -> Result<(), StoreError> {
        let mut records = self.load();
        records.push(record);
        save_list(&self.path, &records)?;

        tracing::debug!("Output log now holds {} record(s)", records.len());
        Ok(())
    }

    /// Rewrite aliased tag references across the whole log.
    ///
    /// The file is only written when at least one reference changed.
    pub fn apply_aliases(&self, aliases: &AliasMap) -> Result<usize, StoreError> {
        let mut records = self.load();
        let changed = rewrite_tag_references(&mut records, aliases);
        if changed > 0 {
            save_list(&self.path, &records)?;
        }
        Ok(changed)
    }
}

/// Replace every reference whose normalized string is a known alias.
///
/// A `vocab: ` marker on the original reference is kept in front of the
/// canonical string. Only references whose stored string actually changes
/// are counted, so a second pass with the same aliases reports zero.
pub fn rewrite_tag_references(records: &mut [Value], aliases: &AliasMap) -> usize {
    let mut changed = 0;

    for record in records.iter_mut() {
        let Some(references) = record.get_mut(TAGS_FIELD).and_then(Value::as_array_mut) else {
            continue;
        };

        for reference in references.iter_mut() {
            let Some(Value::String(current)) = reference.get_mut("string") else {
                continue;
            };

            let key = ReferenceKey::parse(current);
            if let Some(canonical) = aliases.resolve(&key.key) {
                let replacement = key.render(canonical);
                if *current != replacement {
                    *current = replacement;
                    changed += 1;
                }
            }
        }
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Alias, Tag, TagId};
    use serde_json::json;
    use tempfile::tempdir;

    fn alias_map(pairs: &[(&str, i64, &str)]) -> AliasMap {
        let aliases: Vec<Alias> = pairs
            .iter()
            .map(|(alias, id, _)| Alias::new(*alias, id.to_string()))
            .collect();
        let tags: Vec<Tag> = pairs
            .iter()
            .map(|(_, id, canonical)| Tag::new(TagId::Standard(*id), "vocab", *canonical))
            .collect();
        AliasMap::build(&aliases, &tags)
    }

    #[test]
    fn test_append_to_missing_log() {
        let dir = tempdir().unwrap();
        let log = OutputLog::new(dir.path().join("output.json"));

        log.append(json!({ "file": "a.pdf" })).unwrap();
        log.append(json!({ "file": "b.pdf" })).unwrap();

        let records = log.load();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["file"], "b.pdf");
    }

    #[test]
    fn test_append_swallows_corrupt_log() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.json");
        std::fs::write(&path, "{{{{").unwrap();
        let log = OutputLog::new(&path);

        log.append(json!({ "page": 1 })).unwrap();
        assert_eq!(log.load(), vec![json!({ "page": 1 })]);
    }

    #[test]
    fn test_rewrite_keeps_vocab_marker() {
        let map = alias_map(&[("oldname", 5, "NewName")]);
        let mut records = vec![json!({ "Tags": [{ "string": "vocab: oldname" }] })];

        assert_eq!(rewrite_tag_references(&mut records, &map), 1);
        assert_eq!(records[0]["Tags"][0]["string"], "vocab: NewName");
    }

    #[test]
    fn test_rewrite_plain_reference_case_insensitive() {
        let map = alias_map(&[("kitty", 1, "Cat")]);
        let mut records = vec![json!({ "Tags": [{ "string": "  KITTY " }, { "string": "dog" }] })];

        assert_eq!(rewrite_tag_references(&mut records, &map), 1);
        assert_eq!(records[0]["Tags"][0]["string"], "Cat");
        assert_eq!(records[0]["Tags"][1]["string"], "dog");
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let map = alias_map(&[("cat", 1, "Cat"), ("kitty", 1, "Cat")]);
        let mut records = vec![json!({ "Tags": [{ "string": "cat" }, { "string": "kitty" }] })];

        assert_eq!(rewrite_tag_references(&mut records, &map), 2);
        let after_first = records.clone();
        assert_eq!(rewrite_tag_references(&mut records, &map), 0);
        assert_eq!(records, after_first);
    }

    #[test]
    fn test_rewrite_skips_odd_records() {
        let map = alias_map(&[("a", 1, "A")]);
        let mut records = vec![
            json!("just a string"),
            json!({ "Tags": "not a list" }),
            json!({ "Tags": [{ "label": "a" }, { "string": 3 }, "a"] }),
            json!({ "other": true }),
        ];
        let before = records.clone();

        assert_eq!(rewrite_tag_references(&mut records, &map), 0);
        assert_eq!(records, before);
    }

    #[test]
    fn test_apply_without_changes_leaves_file_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.json");
        let original = "[{\"Tags\":[{\"string\":\"untouched\"}]}]";
        std::fs::write(&path, original).unwrap();
        let log = OutputLog::new(&path);

        let changed = log.apply_aliases(&alias_map(&[("other", 1, "Other")])).unwrap();

        assert_eq!(changed, 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_apply_preserves_record_field_order() {
        let dir = tempdir().unwrap();
        let log = OutputLog::new(dir.path().join("output.json"));
        log.append(json!({ "zeta": 1, "Tags": [{ "string": "old" }], "alpha": 2 }))
            .unwrap();

        log.apply_aliases(&alias_map(&[("old", 1, "New")])).unwrap();

        let written = std::fs::read_to_string(log.path()).unwrap();
        let zeta = written.find("zeta").unwrap();
        let alpha = written.find("alpha").unwrap();
        assert!(zeta < alpha);
        assert!(written.contains("\"New\""));
    }
}
