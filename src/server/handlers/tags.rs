//! Tag vocabulary handlers.

use axum::{body::Bytes, extract::State, response::Response};
use serde_json::{json, Map};

use super::helpers::{rejected, run_store, success};
use super::requests::{AddTagsRequest, ReplaceTagsRequest};
use super::super::AppState;

/// Add new tags, skipping any whose string already exists.
pub async fn append_tags(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match AddTagsRequest::parse(&body) {
        Ok(r) => r,
        Err(e) => return rejected("append_tags", e),
    };

    let tags = state.assets.tags.clone();
    match run_store("append_tags", move || tags.add(request.candidates)).await {
        Ok(added) => {
            let mut extra = Map::new();
            extra.insert("added".to_string(), json!(added));
            success(extra)
        }
        Err(response) => response,
    }
}

/// Replace the whole tags file with the submitted list.
pub async fn save_tags(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match ReplaceTagsRequest::parse(&body) {
        Ok(r) => r,
        Err(e) => return rejected("save_tags", e),
    };

    let tags = state.assets.tags.clone();
    let count = request.records.len();
    match run_store("save_tags", move || tags.replace_all(&request.records)).await {
        Ok(()) => {
            tracing::info!("Replaced tags with {} record(s)", count);
            success(Map::new())
        }
        Err(response) => response,
    }
}
