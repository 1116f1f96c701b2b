//! Alias records mapping loose spellings onto tags.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An alternate spelling resolving to a tag id.
///
/// Only `alias` and `id` are kept; anything else a client attaches is
/// dropped on deserialization. The id is always held as a string so that
/// integer and `x`-prefixed tag ids compare uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub alias: String,
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
}

impl Alias {
    pub fn new(alias: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            id: id.into(),
        }
    }
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "id must be a string or number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_id_coerced_to_string() {
        let alias: Alias = serde_json::from_value(json!({ "alias": "kitty", "id": 5 })).unwrap();
        assert_eq!(alias, Alias::new("kitty", "5"));
    }

    #[test]
    fn test_editing_metadata_stripped() {
        let alias: Alias =
            serde_json::from_value(json!({ "alias": "kit", "id": "x2", "_editing": true }))
                .unwrap();
        assert_eq!(
            serde_json::to_value(&alias).unwrap(),
            json!({ "alias": "kit", "id": "x2" })
        );
    }

    #[test]
    fn test_null_id_rejected() {
        let result: Result<Alias, _> = serde_json::from_value(json!({ "alias": "a", "id": null }));
        assert!(result.is_err());
    }
}
