//! Editor session: the surface the rendering layer drives.
//!
//! A session owns one playground's state, projects it once at start, and
//! routes every gesture through the gateway, the router, the gate or the
//! palette.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::PlaygroundApi;
use crate::catalog::{CatalogIndex, PaletteEntry, Service, WidgetRegistry};
use crate::config::Config;
use crate::error::EditorError;
use crate::gate::{Decision, DeletionGate, DeletionRequest, GateState};
use crate::gateway::{MutationGateway, Removal};
use crate::graph::{GraphEdge, GraphNode, GraphSnapshot, Projector};
use crate::ident::{decode, EntityKind, TempIdGenerator};
use crate::palette::CommandPalette;
use crate::playground::{Playground, Position};
use crate::router::ConnectionRouter;
use crate::state::EditorState;

pub struct EditorSession {
    gateway: Arc<MutationGateway>,
    router: ConnectionRouter,
    gate: DeletionGate,
    palette: CommandPalette,
}

impl EditorSession {
    /// Projects `playground` and opens a session on it.
    ///
    /// Fails with [`EditorError::Load`] if the snapshot is inconsistent.
    pub fn start(
        playground: Playground,
        services: Vec<Service>,
        api: Arc<dyn PlaygroundApi>,
        config: &Config,
    ) -> Result<Self, EditorError> {
        let catalog = Arc::new(CatalogIndex::new(services));
        let widgets = WidgetRegistry::new(&catalog, &config.widgets);

        let graph = Projector::new(&catalog, &widgets, config.layout, &config.editor.default_icon)
            .project(&playground)?;

        let playground_id = playground.id;
        info!(
            playground = playground_id,
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "session started"
        );

        let state = EditorState::new(playground, graph).into_shared();
        let gateway = Arc::new(MutationGateway::new(
            api,
            state,
            catalog,
            widgets,
            config.clone(),
            playground_id,
        ));

        let ids = Arc::new(TempIdGenerator::new());
        Ok(Self {
            router: ConnectionRouter::new(gateway.clone()),
            gate: DeletionGate::new(),
            palette: CommandPalette::new(gateway.clone(), ids, config.palette.default_position),
            gateway,
        })
    }

    /// Current graph snapshot.
    pub async fn graph(&self) -> GraphSnapshot {
        self.gateway.state().read().await.graph.clone()
    }

    /// Current playground snapshot.
    pub async fn playground(&self) -> Playground {
        self.gateway.state().read().await.playground.clone()
    }

    pub fn palette(&self) -> &CommandPalette {
        &self.palette
    }

    pub fn palette_entries(&self) -> Vec<PaletteEntry> {
        self.palette.entries()
    }

    /// Catalog entry for a definition, if the catalog has it.
    pub fn entry(&self, kind: EntityKind, definition_id: i64) -> Option<PaletteEntry> {
        self.gateway.catalog().entry(kind, definition_id)
    }

    // ========================================================================
    // Gestures
    // ========================================================================

    /// A catalog entry was dropped on the canvas at `position`.
    pub async fn on_drop(&self, position: Position, entry: &PaletteEntry) -> Result<Option<GraphNode>, EditorError> {
        self.palette.place(entry, position).await
    }

    /// The user dragged a connection from `source` to `target`.
    pub async fn on_connect(&self, source: &str, target: &str) -> Result<GraphEdge, EditorError> {
        self.router.connect(source, target).await
    }

    /// The user picked an entry in the command palette.
    pub async fn on_select_from_palette(&self, entry: &PaletteEntry) -> Result<Option<GraphNode>, EditorError> {
        self.palette.insert_from_catalog(entry).await
    }

    /// Deletion gesture on the canvas.
    ///
    /// Parks on the gate until the user decides. Returns `Ok(false)` when
    /// cancelled, in which case nothing changed. On confirmation the graph
    /// is updated before any remote call is made; refused remote deletes
    /// are logged and, with rollback on, put back on the canvas.
    pub async fn on_delete_request(&self, node_ids: Vec<String>, edge_ids: Vec<String>) -> Result<bool, EditorError> {
        let decision = self
            .gate
            .request(DeletionRequest::new(node_ids.clone(), edge_ids.clone()))?
            .wait()
            .await;

        if decision == Decision::Cancelled {
            info!("deletion cancelled");
            return Ok(false);
        }

        let removal = self.remove_from_graph(&node_ids, &edge_ids).await;
        let report = self.gateway.commit_removal(removal).await;
        if !report.is_success() {
            warn!(failed = report.failures.len(), "some deletions were refused by the backend");
        }
        Ok(true)
    }

    /// Deletion triggered from a node's own widget, which already asked
    /// for confirmation.
    pub async fn delete_node(&self, node_id: &str) -> Result<(), EditorError> {
        let node = decode(node_id).inspect_err(|err| warn!(node = node_id, error = %err, "delete rejected"))?;

        let removal = self.remove_from_graph(&[node_id.to_string()], &[]).await;
        if removal.nodes.is_empty() {
            debug!(%node, "node not on the canvas, deleting remotely only");
            return self.gateway.delete_node(node).await;
        }

        let mut report = self.gateway.commit_removal(removal).await;
        match report.failures.pop() {
            Some((_, err)) => Err(err),
            None => Ok(()),
        }
    }

    async fn remove_from_graph(&self, node_ids: &[String], edge_ids: &[String]) -> Removal {
        let mut state = self.gateway.state().write().await;
        let (nodes, mut edges) = state.graph.remove_nodes(node_ids);
        edges.extend(state.graph.remove_edges(edge_ids));
        Removal { nodes, edges }
    }

    // ========================================================================
    // Gate controls
    // ========================================================================

    pub fn confirm_deletion(&self) -> bool {
        self.gate.confirm()
    }

    pub fn cancel_deletion(&self) -> bool {
        self.gate.cancel()
    }

    pub fn dismiss_deletion(&self) -> bool {
        self.gate.dismiss()
    }

    pub fn pending_deletion(&self) -> Option<DeletionRequest> {
        self.gate.pending()
    }

    pub fn deletion_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn subscribe_deletions(&self) -> watch::Receiver<Option<DeletionRequest>> {
        self.gate.subscribe()
    }
}
