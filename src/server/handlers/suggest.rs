//! Tag autocomplete endpoint.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::helpers::run_store;
use super::super::AppState;
use crate::store::DEFAULT_SUGGESTION_LIMIT;

/// Query params for suggestions.
#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    pub q: Option<String>,
    /// Restrict tag matches to one category
    pub category: Option<String>,
    pub limit: Option<usize>,
}

/// API endpoint for tag autocomplete.
pub async fn api_suggest(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Response {
    let query = params.q.unwrap_or_default();
    let limit = params
        .limit
        .unwrap_or(DEFAULT_SUGGESTION_LIMIT)
        .clamp(1, 100);

    let assets = state.assets.clone();
    let category = params.category;
    match run_store("api_suggest", move || {
        Ok(assets.suggest(&query, category.as_deref(), limit))
    })
    .await
    {
        Ok(suggestions) => Json(suggestions).into_response(),
        Err(response) => response,
    }
}
