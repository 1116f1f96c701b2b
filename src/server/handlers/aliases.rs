//! Alias handlers.

use axum::{body::Bytes, extract::State, response::Response};
use serde_json::{json, Map};

use super::helpers::{rejected, run_store, success};
use super::requests::SaveAliasesRequest;
use super::super::AppState;

/// Replace the alias list and rewrite aliased references in the output log.
pub async fn save_aliases(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match SaveAliasesRequest::parse(&body) {
        Ok(r) => r,
        Err(e) => return rejected("save_aliases", e),
    };

    let assets = state.assets.clone();
    let sweep = move || {
        assets
            .aliases
            .save_and_propagate(&request.aliases, &assets.tags, &assets.output)
    };
    match run_store("save_aliases", sweep).await {
        Ok(updated) => {
            let mut extra = Map::new();
            extra.insert("updated_tags".to_string(), json!(updated));
            success(extra)
        }
        Err(response) => response,
    }
}
