//! Typed request bodies, validated before any store is touched.

use serde_json::Value;
use thiserror::Error;

use crate::models::{Alias, NewTag};

/// Why a request body was rejected. Displayed as the `reason` field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("no data")]
    NoData,

    #[error("no tag data")]
    NoTagData,

    #[error("invalid data")]
    InvalidData,

    #[error("invalid tag at index {index}: {reason}")]
    MalformedTag { index: usize, reason: String },

    #[error("invalid alias at index {index}: {reason}")]
    MalformedAlias { index: usize, reason: String },
}

/// One output record to append.
#[derive(Debug)]
pub struct AppendOutputRequest {
    pub record: Value,
}

impl AppendOutputRequest {
    pub fn parse(body: &[u8]) -> Result<Self, PayloadError> {
        match parse_body(body) {
            Some(record @ Value::Object(_)) if is_truthy(&record) => Ok(Self { record }),
            Some(other) if is_truthy(&other) => Err(PayloadError::InvalidData),
            _ => Err(PayloadError::NoData),
        }
    }
}

/// Candidate tags for `append_tags`.
#[derive(Debug)]
pub struct AddTagsRequest {
    pub candidates: Vec<NewTag>,
}

impl AddTagsRequest {
    pub fn parse(body: &[u8]) -> Result<Self, PayloadError> {
        let items = match parse_body(body) {
            Some(Value::Array(items)) if !items.is_empty() => items,
            Some(other) if is_truthy(&other) => return Err(PayloadError::InvalidData),
            _ => return Err(PayloadError::NoTagData),
        };

        let candidates = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).map_err(|e| PayloadError::MalformedTag {
                    index,
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<NewTag>, _>>()?;

        Ok(Self { candidates })
    }
}

/// Full replacement of the tags file, stored verbatim.
#[derive(Debug)]
pub struct ReplaceTagsRequest {
    pub records: Vec<Value>,
}

impl ReplaceTagsRequest {
    pub fn parse(body: &[u8]) -> Result<Self, PayloadError> {
        match parse_body(body) {
            Some(Value::Array(records)) => Ok(Self { records }),
            _ => Err(PayloadError::InvalidData),
        }
    }
}

/// Full replacement of the alias list.
#[derive(Debug)]
pub struct SaveAliasesRequest {
    pub aliases: Vec<Alias>,
}

impl SaveAliasesRequest {
    pub fn parse(body: &[u8]) -> Result<Self, PayloadError> {
        let Some(Value::Array(items)) = parse_body(body) else {
            return Err(PayloadError::InvalidData);
        };

        let aliases = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).map_err(|e| PayloadError::MalformedAlias {
                    index,
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<Alias>, _>>()?;

        Ok(Self { aliases })
    }
}

/// Decode a body as JSON; empty or unparseable bodies yield `None`.
fn parse_body(body: &[u8]) -> Option<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    serde_json::from_slice(body).ok()
}

/// Empty containers, empty strings, zero, `false` and `null` count as no data.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
