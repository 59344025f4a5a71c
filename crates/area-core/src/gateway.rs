//! Mutation gateway: remote calls plus the local updates their outcome implies.
//!
//! Local state is only ever changed after the remote call has answered, with
//! two exceptions owned by the callers: pending nodes shown at gesture time,
//! and graph removal applied when a deletion is confirmed. When
//! `rollback_on_failure` is set, the gateway undoes those on failure.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, error, info, warn};

use crate::api::{PlaygroundApi, RemoteCall};
use crate::catalog::{CatalogIndex, WidgetRegistry};
use crate::config::Config;
use crate::error::EditorError;
use crate::graph::{
    edge_for_action_link, edge_for_reaction_link, GraphEdge, GraphNode, Projector,
};
use crate::ident::{decode, EntityKind, LinkKind, NodeId};
use crate::playground::{
    empty_settings, ActionLink, PlaygroundAction, PlaygroundReaction, Position, ReactionLink,
};
use crate::state::{EditorState, SharedState};

/// Nodes and edges already taken off the canvas by a confirmed deletion.
#[derive(Debug, Clone, Default)]
pub struct Removal {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Outcome of the remote side of a deletion.
#[derive(Debug, Default)]
pub struct DeletionReport {
    /// Entities the backend deleted.
    pub deleted: Vec<NodeId>,
    /// Entities the backend refused to delete.
    pub failures: Vec<(NodeId, EditorError)>,
    /// Pending nodes and edges, removed from the canvas only.
    pub local_only: usize,
}

impl DeletionReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Wraps the remote API and applies confirmed mutations to the editor state.
pub struct MutationGateway {
    api: Arc<dyn PlaygroundApi>,
    state: SharedState,
    catalog: Arc<CatalogIndex>,
    widgets: WidgetRegistry,
    config: Config,
    playground_id: i64,
}

impl MutationGateway {
    pub fn new(
        api: Arc<dyn PlaygroundApi>,
        state: SharedState,
        catalog: Arc<CatalogIndex>,
        widgets: WidgetRegistry,
        config: Config,
        playground_id: i64,
    ) -> Self {
        Self {
            api,
            state,
            catalog,
            widgets,
            config,
            playground_id,
        }
    }

    pub fn playground_id(&self) -> i64 {
        self.playground_id
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Projector bound to this session's catalog and layout.
    pub fn projector(&self) -> Projector<'_> {
        Projector::new(
            &self.catalog,
            &self.widgets,
            self.config.layout,
            &self.config.editor.default_icon,
        )
    }

    /// Shows a node before the backend has confirmed it.
    pub async fn show_pending(&self, node: GraphNode) {
        debug!(node = %node.id, "showing pending node");
        self.state.write().await.graph.add_node(node);
    }

    /// Places a definition into the playground.
    ///
    /// On success the instance is appended to the playground and its node
    /// added to the graph, taking over `pending` if given. Returns `None`
    /// when the pending node was deleted while the call was in flight; the
    /// freshly created instance is then deleted again.
    pub async fn create_node(
        &self,
        kind: EntityKind,
        definition_id: i64,
        position: Position,
        pending: Option<&str>,
    ) -> Result<Option<GraphNode>, EditorError> {
        let settings = empty_settings();
        let created = match kind {
            EntityKind::Action => self
                .api
                .add_action_to_playground(self.playground_id, definition_id, &settings, position.x, position.y)
                .await
                .map(|a| (NodeId::action(a.id), Created::Action(a)))
                .map_err(|e| EditorError::remote(RemoteCall::AddActionToPlayground, e)),
            EntityKind::Reaction => self
                .api
                .add_reaction_to_playground(self.playground_id, definition_id, &settings, position.x, position.y)
                .await
                .map(|r| (NodeId::reaction(r.id), Created::Reaction(r)))
                .map_err(|e| EditorError::remote(RemoteCall::AddReactionToPlayground, e)),
        };

        let (node_id, created) = match created {
            Ok(created) => created,
            Err(err) => {
                error!(%kind, definition_id, error = %err, "node creation failed");
                if let Some(pending) = pending {
                    if self.config.editor.rollback_on_failure {
                        self.state.write().await.graph.remove_nodes(&[pending.to_string()]);
                        debug!(node = pending, "rolled back pending node");
                    }
                }
                return Err(err);
            }
        };

        {
            let mut state = self.state.write().await;
            let still_shown = pending.map_or(true, |p| state.graph.contains_node(p));

            if still_shown {
                let position = pending
                    .and_then(|p| state.graph.node(p))
                    .map_or(position, |n| n.position);

                let projector = self.projector();
                let node = match created {
                    Created::Action(a) => {
                        let node = projector.node_for_action(self.playground_id, &a, position);
                        state.playground.push_action(a);
                        node
                    }
                    Created::Reaction(r) => {
                        let node = projector.node_for_reaction(self.playground_id, &r, position);
                        state.playground.push_reaction(r);
                        node
                    }
                };

                match pending {
                    Some(p) => {
                        state.graph.replace_node(p, node.clone());
                    }
                    None => state.graph.add_node(node.clone()),
                }
                info!(node = %node.id, "node created");
                return Ok(Some(node));
            }
        }

        warn!(node = %node_id, "pending node deleted before confirmation, removing instance");
        if let Err(err) = self.delete_remote(node_id).await {
            error!(node = %node_id, error = %err, "failed to remove orphaned instance");
        }
        Ok(None)
    }

    /// Calls the remote delete and drops the entity from the playground.
    ///
    /// The graph is left alone: callers remove the node first.
    pub async fn delete_node(&self, node: NodeId) -> Result<(), EditorError> {
        self.delete_remote(node).await?;
        self.state.write().await.playground.remove(node);
        info!(%node, "node deleted");
        Ok(())
    }

    async fn delete_remote(&self, node: NodeId) -> Result<(), EditorError> {
        match node.kind {
            EntityKind::Action => self
                .api
                .delete_action_from_playground(self.playground_id, node.id)
                .await
                .map_err(|e| EditorError::remote(RemoteCall::DeleteActionFromPlayground, e)),
            EntityKind::Reaction => self
                .api
                .delete_reaction_from_playground(self.playground_id, node.id)
                .await
                .map_err(|e| EditorError::remote(RemoteCall::DeleteReactionFromPlayground, e)),
        }
    }

    /// Issues one remote delete per entity node of a removal already
    /// applied to the graph.
    ///
    /// Pending nodes and edges stay local: the backend has no link deletion,
    /// and a pending node is cleaned up when its creation resolves.
    pub async fn commit_removal(&self, removal: Removal) -> DeletionReport {
        let mut report = DeletionReport {
            local_only: removal.edges.len(),
            ..Default::default()
        };

        let mut targets = Vec::new();
        for node in &removal.nodes {
            match decode(&node.id) {
                Ok(id) => targets.push((id, node)),
                Err(_) => {
                    debug!(node = %node.id, "removed pending node locally");
                    report.local_only += 1;
                }
            }
        }

        let results = join_all(targets.iter().map(|(id, _)| self.delete_node(*id))).await;

        for ((id, node), result) in targets.into_iter().zip(results) {
            match result {
                Ok(()) => report.deleted.push(id),
                Err(err) => {
                    error!(node = %id, error = %err, "remote deletion failed");
                    if self.config.editor.rollback_on_failure {
                        self.restore(node, &removal.edges).await;
                    }
                    report.failures.push((id, err));
                }
            }
        }

        report
    }

    /// Puts a node whose deletion failed back on the canvas, with its edges.
    async fn restore(&self, node: &GraphNode, removed_edges: &[GraphEdge]) {
        let edges = removed_edges
            .iter()
            .filter(|e| e.touches(&node.id))
            .cloned()
            .collect();

        self.state
            .write()
            .await
            .graph
            .restore(vec![node.clone()], edges);
        debug!(node = %node.id, "restored node after failed deletion");
    }

    /// Creates a link and adds its edge.
    ///
    /// Both endpoints must still be on the canvas and in the playground when
    /// the backend answers; otherwise nothing is recorded and
    /// [`EditorError::EndpointRemoved`] is returned.
    pub async fn create_link(
        &self,
        kind: LinkKind,
        source: NodeId,
        target: NodeId,
    ) -> Result<GraphEdge, EditorError> {
        let link = match kind {
            LinkKind::Action => self
                .api
                .add_action_to_reaction_link(source.id, target.id)
                .await
                .map(Linked::Action)
                .map_err(|e| EditorError::remote(RemoteCall::AddActionToReactionLink, e))?,
            LinkKind::Reaction => self
                .api
                .add_reaction_to_reaction_link(source.id, target.id)
                .await
                .map(Linked::Reaction)
                .map_err(|e| EditorError::remote(RemoteCall::AddReactionToReactionLink, e))?,
        };
        let edge = match &link {
            Linked::Action(l) => edge_for_action_link(l),
            Linked::Reaction(l) => edge_for_reaction_link(l),
        };

        let mut state = self.state.write().await;
        let present = |state: &EditorState, node: NodeId| {
            state.playground.contains(node) && state.graph.contains_node(&node.to_string())
        };
        if !present(&state, source) || !present(&state, target) {
            // The backend has no link deletion, so the remote link stays behind.
            warn!(edge = %edge.id, "link endpoint removed before confirmation, link not recorded");
            return Err(EditorError::EndpointRemoved {
                source_id: source.to_string(),
                target_id: target.to_string(),
            });
        }

        match link {
            Linked::Action(l) => state.playground.push_action_link(l),
            Linked::Reaction(l) => state.playground.push_reaction_link(l),
        }
        state.graph.add_edge(edge.clone());
        info!(edge = %edge.id, "link created");
        Ok(edge)
    }
}

enum Linked {
    Action(ActionLink),
    Reaction(ReactionLink),
}

enum Created {
    Action(PlaygroundAction),
    Reaction(PlaygroundReaction),
}
