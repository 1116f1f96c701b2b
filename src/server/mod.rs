//! Web server for the annotation UI.
//!
//! Serves the static single-page UI and the JSON endpoints that mutate the
//! asset stores:
//! - Appending annotated output records
//! - Adding and replacing vocabulary tags
//! - Replacing aliases and sweeping them through the output log

mod handlers;
mod routes;

pub use handlers::requests::PayloadError;
pub use routes::create_router;

use std::path::PathBuf;

use tokio::net::TcpListener;

use crate::config::Settings;
use crate::store::Assets;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub assets: Assets,
    /// Directory holding the UI markup, scripts and styles.
    pub root_dir: PathBuf,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            assets: Assets::in_dir(&settings.assets_dir),
            root_dir: settings.root_dir.clone(),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings);
    let app = create_router(state);

    let listener = bind_listener(host, port).await?;
    tracing::info!("Starting server at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Bind a listener, resolving host names such as `localhost`.
async fn bind_listener(host: &str, port: u16) -> anyhow::Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}:{}: {}", host, port, e))
}
