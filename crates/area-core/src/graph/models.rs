//! Graph snapshot handed to the rendering layer.
//!
//! These mirror the node/edge objects the canvas widget consumes, so they
//! serialize straight into its JSON shape.

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::Definition;
use crate::ident::EntityKind;
use crate::playground::{Position, Settings};

// =============================================================================
// Graph Data Models
// =============================================================================

/// A node on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    /// `<kind>:<instanceId>`, or `pending:<n>` until the backend confirms it.
    pub id: String,
    /// `<kind>:<definitionId>`, selects rendering and behavior.
    #[serde(rename = "type")]
    pub widget_type: String,
    pub position: Position,
    pub data: NodeData,
}

/// Payload attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub playground_id: i64,
    pub kind: EntityKind,
    /// Instance id in the playground; `None` while pending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<i64>,
    pub settings: Settings,
    /// Definition metadata, unset when the catalog does not know it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<Definition>,
    pub icon: String,
    /// Widget that renders this node.
    pub widget: String,
}

impl GraphNode {
    /// Returns true for a node still waiting for backend confirmation.
    pub fn is_pending(&self) -> bool {
        self.data.instance_id.is_none()
    }
}

/// A link between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    /// `link:<linkKind>:<linkId>`
    pub id: String,
    pub source: String,
    pub target: String,
}

impl GraphEdge {
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// Full graph state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

// =============================================================================
// Incremental Updates
// =============================================================================
//
// Each mutator rebuilds the collection it touches and swaps it in, so a
// reader never sees a half-applied change.

impl GraphSnapshot {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn contains_edge(&self, id: &str) -> bool {
        self.edges.iter().any(|e| e.id == id)
    }

    pub fn node_ids(&self) -> HashSet<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    pub fn edge_ids(&self) -> HashSet<String> {
        self.edges.iter().map(|e| e.id.clone()).collect()
    }

    /// Adds a node, replacing any node with the same id.
    pub fn add_node(&mut self, node: GraphNode) {
        let mut nodes: Vec<GraphNode> = self
            .nodes
            .iter()
            .filter(|n| n.id != node.id)
            .cloned()
            .collect();
        nodes.push(node);
        self.nodes = nodes;
    }

    /// Swaps the node `old_id` for `node`, keeping its place in the list.
    ///
    /// Edges pointing at `old_id` follow the new id. Returns false when
    /// `old_id` is not in the graph.
    pub fn replace_node(&mut self, old_id: &str, node: GraphNode) -> bool {
        if !self.contains_node(old_id) {
            return false;
        }

        let new_id = node.id.clone();
        let mut replacement = Some(node);
        self.nodes = self
            .nodes
            .iter()
            .filter_map(|n| {
                if n.id == old_id {
                    replacement.take()
                } else if n.id == new_id {
                    None
                } else {
                    Some(n.clone())
                }
            })
            .collect();

        self.edges = self
            .edges
            .iter()
            .map(|e| {
                let mut e = e.clone();
                if e.source == old_id {
                    e.source = new_id.clone();
                }
                if e.target == old_id {
                    e.target = new_id.clone();
                }
                e
            })
            .collect();
        true
    }

    /// Adds an edge unless one with the same id exists.
    ///
    /// Every playground link gets its own edge, so two edges may share
    /// endpoints. Returns true if the edge was added.
    pub fn add_edge(&mut self, edge: GraphEdge) -> bool {
        if self.contains_edge(&edge.id) {
            return false;
        }

        let mut edges = self.edges.clone();
        edges.push(edge);
        self.edges = edges;
        true
    }

    /// Removes the given nodes and every edge touching them.
    ///
    /// Returns the removed nodes and edges.
    pub fn remove_nodes(&mut self, ids: &[String]) -> (Vec<GraphNode>, Vec<GraphEdge>) {
        let ids: HashSet<&str> = ids.iter().map(String::as_str).collect();

        let (removed, kept): (Vec<_>, Vec<_>) = self
            .nodes
            .iter()
            .cloned()
            .partition(|n| ids.contains(n.id.as_str()));

        let (dropped_edges, kept_edges): (Vec<_>, Vec<_>) = self
            .edges
            .iter()
            .cloned()
            .partition(|e| ids.contains(e.source.as_str()) || ids.contains(e.target.as_str()));

        self.nodes = kept;
        self.edges = kept_edges;
        (removed, dropped_edges)
    }

    /// Removes edges by id, returning the ones that existed.
    pub fn remove_edges(&mut self, ids: &[String]) -> Vec<GraphEdge> {
        let ids: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let (removed, kept): (Vec<_>, Vec<_>) = self
            .edges
            .iter()
            .cloned()
            .partition(|e| ids.contains(e.id.as_str()));
        self.edges = kept;
        removed
    }

    /// Puts back nodes and edges taken out by a failed deletion.
    pub fn restore(&mut self, nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) {
        for node in nodes {
            self.add_node(node);
        }
        for edge in edges {
            // Only reattach edges whose endpoints are still on the canvas.
            if self.contains_node(&edge.source) && self.contains_node(&edge.target) {
                self.add_edge(edge);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            widget_type: "action:1".to_string(),
            position: Position::default(),
            data: NodeData {
                playground_id: 1,
                kind: EntityKind::Action,
                instance_id: Some(1),
                settings: serde_json::json!({}),
                definition: None,
                icon: "Book".to_string(),
                widget: "default".to_string(),
            },
        }
    }

    fn edge(id: &str, source: &str, target: &str) -> GraphEdge {
        GraphEdge {
            id: id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    fn graph() -> GraphSnapshot {
        GraphSnapshot {
            nodes: vec![node("action:1"), node("reaction:2"), node("reaction:3")],
            edges: vec![
                edge("link:action:1", "action:1", "reaction:2"),
                edge("link:reaction:1", "reaction:2", "reaction:3"),
            ],
        }
    }

    #[test]
    fn test_remove_nodes_cascades_edges() {
        let mut g = graph();
        let (nodes, edges) = g.remove_nodes(&["reaction:2".to_string()]);
        assert_eq!(nodes.len(), 1);
        assert_eq!(edges.len(), 2);
        assert_eq!(g.nodes.len(), 2);
        assert!(g.edges.is_empty());
    }

    #[test]
    fn test_add_edge_rejects_duplicates() {
        let mut g = graph();
        assert!(!g.add_edge(edge("link:action:1", "x", "y")));
        assert!(g.add_edge(edge("link:action:9", "action:1", "reaction:2")));
        assert!(!g.add_edge(edge("link:action:9", "action:1", "reaction:3")));
        assert_eq!(g.edges.len(), 3);
    }

    #[test]
    fn test_replace_node_rewires_edges() {
        let mut g = graph();
        assert!(g.replace_node("reaction:2", node("reaction:20")));
        assert_eq!(g.nodes[1].id, "reaction:20");
        assert_eq!(g.edges[0].target, "reaction:20");
        assert_eq!(g.edges[1].source, "reaction:20");
        assert!(!g.replace_node("reaction:2", node("reaction:21")));
    }

    #[test]
    fn test_restore_after_removal() {
        let mut g = graph();
        let before = g.edge_ids();
        let (nodes, edges) = g.remove_nodes(&["action:1".to_string()]);
        g.restore(nodes, edges);
        assert_eq!(g.nodes.len(), 3);
        assert_eq!(g.edge_ids(), before);
    }
}
