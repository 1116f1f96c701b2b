//! Router configuration for the web server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let assets = ServeDir::new(state.assets.dir());
    let ui = ServeDir::new(&state.root_dir);

    Router::new()
        // Store mutations
        .route("/append_output", post(handlers::append_output))
        .route("/append_tags", post(handlers::append_tags))
        .route("/save_tags", post(handlers::save_tags))
        .route("/save_aliases", post(handlers::save_aliases))
        // Autocomplete
        .route("/api/suggest", get(handlers::api_suggest))
        // Store files are read by the UI directly
        .nest_service("/assets", assets)
        // Everything else is the static UI
        .fallback_service(ui)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
