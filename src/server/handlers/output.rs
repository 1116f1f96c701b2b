//! Output log handlers.

use axum::{body::Bytes, extract::State, response::Response};
use serde_json::Map;

use super::helpers::{rejected, run_store, success};
use super::requests::AppendOutputRequest;
use super::super::AppState;

/// Append one annotated record to the output log.
pub async fn append_output(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match AppendOutputRequest::parse(&body) {
        Ok(r) => r,
        Err(e) => return rejected("append_output", e),
    };

    let output = state.assets.output.clone();
    match run_store("append_output", move || output.append(request.record)).await {
        Ok(()) => success(Map::new()),
        Err(response) => response,
    }
}
