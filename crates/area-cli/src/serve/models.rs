//! Request and response bodies for the editing bridge.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use area_core::{EditorError, EntityKind, PaletteEntry, Position};

// =============================================================================
// Requests
// =============================================================================

/// A catalog definition, as picked in the palette.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRequest {
    pub kind: EntityKind,
    pub definition_id: i64,
}

/// A catalog definition dropped on the canvas.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropRequest {
    pub kind: EntityKind,
    pub definition_id: i64,
    pub position: Position,
}

#[derive(Debug, Deserialize)]
pub struct ConnectRequest {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub edges: Vec<String>,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Serialize)]
pub struct PaletteView {
    pub open: bool,
    pub entries: Vec<PaletteEntry>,
}

#[derive(Debug, Serialize)]
pub struct DeleteOutcome {
    pub confirmed: bool,
}

#[derive(Debug, Serialize)]
pub struct Resolved {
    /// False when no deletion was pending.
    pub resolved: bool,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Failure of a bridge call.
#[derive(Debug)]
pub enum BridgeError {
    UnknownDefinition(EntityKind, i64),
    Editor(EditorError),
    /// The detached session task panicked or was aborted.
    Interrupted(String),
}

impl From<EditorError> for BridgeError {
    fn from(err: EditorError) -> Self {
        BridgeError::Editor(err)
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            BridgeError::UnknownDefinition(kind, id) => {
                (StatusCode::NOT_FOUND, format!("No {kind} definition {id} in the catalog"))
            }
            BridgeError::Interrupted(reason) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Editing task did not finish: {reason}"),
            ),
            BridgeError::Editor(err) => {
                let status = match &err {
                    EditorError::MalformedIdentifier(_) | EditorError::InvalidConnection { .. } => {
                        StatusCode::BAD_REQUEST
                    }
                    EditorError::RemoteMutation { .. } => StatusCode::BAD_GATEWAY,
                    EditorError::GateBusy | EditorError::EndpointRemoved { .. } => StatusCode::CONFLICT,
                    EditorError::Load(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
