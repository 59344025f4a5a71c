//! Local HTTP bridge between a rendering layer and an editor session.
//!
//! The rendering layer draws the graph and forwards gestures here; every
//! gesture maps to one session operation. `POST /api/delete` blocks until
//! the deletion is confirmed or cancelled through the `/api/delete/*`
//! controls.
//!
//! # Module Structure
//!
//! - `handlers` - HTTP route handlers
//! - `models` - API request/response types (DTOs)

mod handlers;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use color_eyre::eyre::Result;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use area_core::catalog::Service;
use area_core::{Config, EditorSession, HttpPlaygroundClient, Playground};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state for the server.
pub struct AppState {
    pub session: EditorSession,
}

// =============================================================================
// Server Configuration
// =============================================================================

pub struct ServeConfig {
    /// Port to listen on.
    pub port: u16,
    /// Playground snapshot to edit.
    pub playground: Playground,
    /// Service catalog.
    pub services: Vec<Service>,
    pub config: Config,
}

// =============================================================================
// Server Entry Point
// =============================================================================

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/graph", get(handlers::api_graph))
        .route("/api/palette", get(handlers::api_palette))
        .route("/api/palette/select", post(handlers::api_palette_select))
        .route("/api/drop", post(handlers::api_drop))
        .route("/api/connect", post(handlers::api_connect))
        .route("/api/delete", post(handlers::api_delete))
        .route("/api/delete/pending", get(handlers::api_delete_pending))
        .route("/api/delete/confirm", post(handlers::api_delete_confirm))
        .route("/api/delete/cancel", post(handlers::api_delete_cancel))
        .route("/api/delete/dismiss", post(handlers::api_delete_dismiss))
        .route("/api/node/{id}", delete(handlers::api_delete_node))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}

/// Start the editing bridge.
pub async fn start_server(config: ServeConfig) -> Result<()> {
    let api = Arc::new(HttpPlaygroundClient::from_config(&config.config.backend)?);
    let session = EditorSession::start(config.playground, config.services, api, &config.config)?;
    let app = router(Arc::new(AppState { session }));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!(%addr, backend = %config.config.backend.base_url, "editing bridge listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
