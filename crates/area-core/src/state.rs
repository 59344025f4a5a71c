use std::sync::Arc;

use tokio::sync::RwLock;

use crate::graph::GraphSnapshot;
use crate::playground::Playground;

/// The two representations the editor keeps in lock-step.
///
/// Guards are never held across an `.await`: every completion takes the
/// write lock, swaps the collections it changes and releases it.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub playground: Playground,
    pub graph: GraphSnapshot,
}

/// Editor state shared between gesture handlers.
pub type SharedState = Arc<RwLock<EditorState>>;

impl EditorState {
    pub fn new(playground: Playground, graph: GraphSnapshot) -> Self {
        Self { playground, graph }
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }
}
