//! Editor error taxonomy.

use thiserror::Error;

use crate::api::{ApiError, RemoteCall};
use crate::graph::LoadError;
use crate::ident::IdentifierError;

/// Errors surfaced by editing gestures.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Unparseable composite id. The gesture is dropped.
    #[error(transparent)]
    MalformedIdentifier(#[from] IdentifierError),

    /// Unsupported connection. No remote call was made.
    #[error("Cannot connect {source_id} to {target_id}: {reason}")]
    InvalidConnection {
        source_id: String,
        target_id: String,
        reason: String,
    },

    /// An endpoint was deleted while its link was being created. The link
    /// was not recorded.
    #[error("Cannot link {source_id} to {target_id}: an endpoint was removed")]
    EndpointRemoved { source_id: String, target_id: String },

    /// The backend rejected or failed a mutation.
    #[error("{call} failed: {source}")]
    RemoteMutation {
        call: RemoteCall,
        #[source]
        source: ApiError,
    },

    /// The initial playground snapshot is structurally invalid.
    #[error("Failed to load playground: {0}")]
    Load(#[from] LoadError),

    /// A deletion is already waiting for confirmation.
    #[error("A deletion is already awaiting confirmation")]
    GateBusy,
}

impl EditorError {
    pub fn remote(call: RemoteCall, source: ApiError) -> Self {
        EditorError::RemoteMutation { call, source }
    }

    pub fn invalid_connection(source: &str, target: &str, reason: impl Into<String>) -> Self {
        EditorError::InvalidConnection {
            source_id: source.to_string(),
            target_id: target.to_string(),
            reason: reason.into(),
        }
    }
}
