//! Response helpers shared by the JSON handlers.

use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

use super::requests::PayloadError;
use crate::store::StoreError;

/// `{"status": "success"}` merged with any extra fields.
pub fn success(extra: Map<String, Value>) -> Response {
    let mut body = Map::new();
    body.insert("status".to_string(), json!("success"));
    body.extend(extra);
    Json(Value::Object(body)).into_response()
}

/// `{"status": "fail", "reason": ...}` with the given status code.
pub fn fail(status: StatusCode, reason: impl Display) -> Response {
    (
        status,
        Json(json!({ "status": "fail", "reason": reason.to_string() })),
    )
        .into_response()
}

/// Client error for a rejected body. No store has been touched.
pub fn rejected(endpoint: &str, err: PayloadError) -> Response {
    tracing::warn!("Rejected {} request: {}", endpoint, err);
    fail(StatusCode::BAD_REQUEST, err)
}

/// Server error for a failed store write.
pub fn store_failed(endpoint: &str, err: StoreError) -> Response {
    tracing::error!("{} failed: {}", endpoint, err);
    fail(StatusCode::INTERNAL_SERVER_ERROR, err)
}

/// Run a synchronous store call on the blocking pool.
///
/// Store errors and a panicked task both come back as a 500 response.
pub async fn run_store<T, F>(endpoint: &'static str, op: F) -> Result<T, Response>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(op).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(store_failed(endpoint, e)),
        Err(e) => {
            tracing::error!("{} task failed: {}", endpoint, e);
            Err(fail(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}
