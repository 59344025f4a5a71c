//! HTTP route handlers for the editing bridge.
//!
//! Handlers are kept thin, delegating to the editor session. Gestures that
//! mutate the backend run on their own task, so a client hanging up does not
//! stop a pipeline between its remote call and the local update.

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use area_core::{
    DeletionRequest, EditorError, EntityKind, GraphEdge, GraphNode, GraphSnapshot, PaletteEntry,
};

use super::models::{
    BridgeError, ConnectRequest, DeleteOutcome, DeleteRequest, DropRequest, PaletteView,
    Resolved, SelectRequest,
};
use super::AppState;

type Shared = State<Arc<AppState>>;

fn lookup(state: &AppState, kind: EntityKind, definition_id: i64) -> Result<PaletteEntry, BridgeError> {
    state
        .session
        .entry(kind, definition_id)
        .ok_or(BridgeError::UnknownDefinition(kind, definition_id))
}

/// Runs a session operation to completion, whether or not the request is
/// still waiting for it.
async fn detached<T, F>(operation: F) -> Result<T, BridgeError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, EditorError>> + Send + 'static,
{
    match tokio::spawn(operation).await {
        Ok(result) => Ok(result?),
        Err(err) => Err(BridgeError::Interrupted(err.to_string())),
    }
}

// =============================================================================
// Graph & Palette
// =============================================================================

/// GET `/api/graph` - Current graph snapshot.
pub async fn api_graph(State(state): Shared) -> Json<GraphSnapshot> {
    Json(state.session.graph().await)
}

/// GET `/api/palette` - Palette entries and open state.
pub async fn api_palette(State(state): Shared) -> Json<PaletteView> {
    Json(PaletteView {
        open: state.session.palette().is_open(),
        entries: state.session.palette_entries(),
    })
}

/// POST `/api/palette/select` - Insert a definition at the palette position.
///
/// Responds with `null` if the node was deleted before the backend confirmed it.
pub async fn api_palette_select(
    State(state): Shared,
    Json(req): Json<SelectRequest>,
) -> Result<Json<Option<GraphNode>>, BridgeError> {
    let entry = lookup(&state, req.kind, req.definition_id)?;
    let node = detached(async move { state.session.on_select_from_palette(&entry).await }).await?;
    Ok(Json(node))
}

// =============================================================================
// Gestures
// =============================================================================

/// POST `/api/drop` - Insert a definition under the pointer.
pub async fn api_drop(
    State(state): Shared,
    Json(req): Json<DropRequest>,
) -> Result<Json<Option<GraphNode>>, BridgeError> {
    let entry = lookup(&state, req.kind, req.definition_id)?;
    let node = detached(async move { state.session.on_drop(req.position, &entry).await }).await?;
    Ok(Json(node))
}

/// POST `/api/connect` - Link two nodes.
pub async fn api_connect(
    State(state): Shared,
    Json(req): Json<ConnectRequest>,
) -> Result<Json<GraphEdge>, BridgeError> {
    let edge = detached(async move { state.session.on_connect(&req.source, &req.target).await }).await?;
    Ok(Json(edge))
}

/// DELETE `/api/node/{id}` - Delete from a node widget, without the prompt.
pub async fn api_delete_node(
    State(state): Shared,
    Path(id): Path<String>,
) -> Result<StatusCode, BridgeError> {
    detached(async move { state.session.delete_node(&id).await }).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Deletion Prompt
// =============================================================================

/// POST `/api/delete` - Request a deletion and wait for the user's answer.
pub async fn api_delete(
    State(state): Shared,
    Json(req): Json<DeleteRequest>,
) -> Result<Json<DeleteOutcome>, BridgeError> {
    let confirmed =
        detached(async move { state.session.on_delete_request(req.nodes, req.edges).await }).await?;
    Ok(Json(DeleteOutcome { confirmed }))
}

/// GET `/api/delete/pending` - The deletion awaiting an answer, if any.
pub async fn api_delete_pending(State(state): Shared) -> Json<Option<DeletionRequest>> {
    Json(state.session.pending_deletion())
}

pub async fn api_delete_confirm(State(state): Shared) -> Json<Resolved> {
    Json(Resolved {
        resolved: state.session.confirm_deletion(),
    })
}

pub async fn api_delete_cancel(State(state): Shared) -> Json<Resolved> {
    Json(Resolved {
        resolved: state.session.cancel_deletion(),
    })
}

pub async fn api_delete_dismiss(State(state): Shared) -> Json<Resolved> {
    Json(Resolved {
        resolved: state.session.dismiss_deletion(),
    })
}
