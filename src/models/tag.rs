//! Tag vocabulary records and id allocation.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Categories whose tags are allocated in the `x<N>` id space.
pub const CUSTOM_CATEGORIES: [&str; 2] = ["custom", "custom vocab"];

/// Identifier of a tag.
///
/// Standard tags use plain integers, custom tags use `x`-prefixed strings
/// such as `x3`. The two spaces are allocated independently. Ids written by
/// the UI that fit neither space are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagId {
    Standard(i64),
    Named(String),
    Other(Value),
}

impl TagId {
    /// Classify a raw `id` value; anything outside both spaces becomes `Other`.
    pub fn from_value(value: Value) -> Self {
        if let Some(n) = value.as_i64() {
            return TagId::Standard(n);
        }
        match value {
            Value::String(s) => TagId::Named(s),
            other => TagId::Other(other),
        }
    }

    /// Build an id in the custom space.
    pub fn custom(index: u64) -> Self {
        TagId::Named(format!("x{}", index))
    }

    /// Integer value when this id belongs to the standard space.
    pub fn standard_value(&self) -> Option<i64> {
        match self {
            TagId::Standard(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric suffix when this id belongs to the custom space.
    pub fn custom_index(&self) -> Option<u64> {
        match self {
            TagId::Named(s) => s.strip_prefix('x')?.parse().ok(),
            _ => None,
        }
    }
}

/// String form used to match alias targets against tags.
impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagId::Standard(n) => write!(f, "{}", n),
            TagId::Named(s) => f.write_str(s),
            TagId::Other(v) => write!(f, "{}", v),
        }
    }
}

/// A stored tag.
///
/// `category` and `string` are optional on load because the tags file can be
/// replaced wholesale by the UI; fields the store does not know about are
/// preserved in `extra` so rewrites keep them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tag {
    pub fn new(id: TagId, category: impl Into<String>, string: impl Into<String>) -> Self {
        Self {
            id,
            category: Some(category.into()),
            string: Some(string.into()),
            extra: Map::new(),
        }
    }

    /// Display text, empty when the record has none.
    pub fn display(&self) -> &str {
        self.string.as_deref().unwrap_or("")
    }

    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    /// Read a stored record without rejecting it.
    ///
    /// Records written wholesale by the UI may carry a non-string `category`
    /// or `string`, or no `id` at all. Such fields stay in `extra` and the
    /// missing id becomes `Other(null)`. Only non-objects yield `None`.
    pub fn from_record(record: &Value) -> Option<Self> {
        let mut fields = record.as_object()?.clone();
        let id = fields
            .remove("id")
            .map_or(TagId::Other(Value::Null), TagId::from_value);
        let category = take_string(&mut fields, "category");
        let string = take_string(&mut fields, "string");
        Some(Self {
            id,
            category,
            string,
            extra: fields,
        })
    }

    /// Key used for duplicate detection.
    pub fn dedup_key(&self) -> Option<String> {
        self.string.as_deref().map(normalize)
    }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            fields.insert(key.to_string(), other);
            None
        }
        None => None,
    }
}

/// An id space has no successor left for its largest id.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("No {space} tag id left after {max}")]
pub struct IdSpaceExhausted {
    pub space: &'static str,
    pub max: String,
}

/// A candidate tag submitted for addition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewTag {
    pub string: String,
    pub category: String,
}

/// Trim and lowercase a tag string for comparison.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

pub fn is_custom_category(category: &str) -> bool {
    CUSTOM_CATEGORIES.contains(&category)
}

/// Next id in the standard space: max existing + 1, or 1 when empty.
pub fn next_standard_id(tags: &[Tag]) -> Result<TagId, IdSpaceExhausted> {
    match tags.iter().filter_map(|t| t.id.standard_value()).max() {
        None => Ok(TagId::Standard(1)),
        Some(max) => max
            .checked_add(1)
            .map(TagId::Standard)
            .ok_or_else(|| IdSpaceExhausted {
                space: "standard",
                max: max.to_string(),
            }),
    }
}

/// Next id in the custom space: `x<max + 1>`, or `x1` when empty.
pub fn next_custom_id(tags: &[Tag]) -> Result<TagId, IdSpaceExhausted> {
    match tags.iter().filter_map(|t| t.id.custom_index()).max() {
        None => Ok(TagId::custom(1)),
        Some(max) => max
            .checked_add(1)
            .map(TagId::custom)
            .ok_or_else(|| IdSpaceExhausted {
                space: "custom",
                max: format!("x{}", max),
            }),
    }
}

/// Append every candidate whose normalized string is not yet present.
///
/// Ids are allocated per candidate against the growing list, so later
/// candidates in the same batch see the ids handed out before them.
/// Returns the records that were added, in input order. Nothing is appended
/// when an id space runs out.
pub fn merge_new_tags(
    tags: &mut Vec<Tag>,
    candidates: Vec<NewTag>,
) -> Result<Vec<Tag>, IdSpaceExhausted> {
    let mut seen: HashSet<String> = tags.iter().filter_map(Tag::dedup_key).collect();
    let mut added = Vec::new();

    for candidate in candidates {
        let key = normalize(&candidate.string);
        if seen.contains(&key) {
            continue;
        }

        let id = if is_custom_category(&candidate.category) {
            next_custom_id(tags)?
        } else {
            next_standard_id(tags)?
        };

        let tag = Tag::new(id, candidate.category, candidate.string);
        tags.push(tag.clone());
        seen.insert(key);
        added.push(tag);
    }

    Ok(added)
}
