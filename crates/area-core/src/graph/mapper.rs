//! Projection of a playground onto the canvas graph.
//!
//! Handles the conversion from playground entities to graph nodes and edges,
//! and builds the single nodes/edges the gateway adds after a confirmed
//! mutation, so both paths render an entity the same way.

use std::collections::HashSet;

use crate::catalog::{CatalogIndex, PaletteEntry, WidgetRegistry};
use crate::config::LayoutConfig;
use crate::ident::{encode, EdgeId, EntityKind, LinkKind, NodeId};
use crate::playground::{
    ActionLink, Playground, PlaygroundAction, PlaygroundReaction, Position, ReactionLink, Settings,
};

use super::models::{GraphEdge, GraphNode, GraphSnapshot, NodeData};
use super::LoadError;

/// Builds graph nodes and edges from playground entities.
///
/// Borrowed catalog lookups make it cheap to create per operation.
#[derive(Debug, Clone, Copy)]
pub struct Projector<'a> {
    catalog: &'a CatalogIndex,
    widgets: &'a WidgetRegistry,
    layout: LayoutConfig,
    default_icon: &'a str,
}

impl<'a> Projector<'a> {
    pub fn new(
        catalog: &'a CatalogIndex,
        widgets: &'a WidgetRegistry,
        layout: LayoutConfig,
        default_icon: &'a str,
    ) -> Self {
        Self {
            catalog,
            widgets,
            layout,
            default_icon,
        }
    }

    /// Projects the whole playground.
    ///
    /// Nodes are laid out in two lanes (actions, then reactions) ordered as
    /// in the playground; stored positions are ignored.
    pub fn project(&self, playground: &Playground) -> Result<GraphSnapshot, LoadError> {
        validate(playground)?;

        let mut nodes = Vec::with_capacity(playground.actions.len() + playground.reactions.len());
        for (index, action) in playground.actions.iter().enumerate() {
            let position = self.lane_position(EntityKind::Action, index);
            nodes.push(self.node_for_action(playground.id, action, position));
        }
        for (index, reaction) in playground.reactions.iter().enumerate() {
            let position = self.lane_position(EntityKind::Reaction, index);
            nodes.push(self.node_for_reaction(playground.id, reaction, position));
        }

        let edges = playground
            .action_links
            .iter()
            .map(edge_for_action_link)
            .chain(playground.reaction_links.iter().map(edge_for_reaction_link))
            .collect();

        Ok(GraphSnapshot { nodes, edges })
    }

    /// Position of the `index`-th node of a lane.
    pub fn lane_position(&self, kind: EntityKind, index: usize) -> Position {
        let x = match kind {
            EntityKind::Action => 0.0,
            EntityKind::Reaction => self.layout.horizontal_spacing,
        };
        Position::new(x, index as f64 * self.layout.vertical_spacing)
    }

    pub fn node_for_action(
        &self,
        playground_id: i64,
        action: &PlaygroundAction,
        position: Position,
    ) -> GraphNode {
        self.build_node(
            NodeId::action(action.id).to_string(),
            Some(action.id),
            EntityKind::Action,
            action.action_id,
            playground_id,
            action.settings.clone(),
            position,
        )
    }

    pub fn node_for_reaction(
        &self,
        playground_id: i64,
        reaction: &PlaygroundReaction,
        position: Position,
    ) -> GraphNode {
        self.build_node(
            NodeId::reaction(reaction.id).to_string(),
            Some(reaction.id),
            EntityKind::Reaction,
            reaction.reaction_id,
            playground_id,
            reaction.settings.clone(),
            position,
        )
    }

    /// Node shown for a catalog entry before the backend confirms it.
    pub fn pending_node(
        &self,
        pending_id: String,
        playground_id: i64,
        entry: &PaletteEntry,
        position: Position,
    ) -> GraphNode {
        self.build_node(
            pending_id,
            None,
            entry.kind,
            entry.definition.id,
            playground_id,
            crate::playground::empty_settings(),
            position,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn build_node(
        &self,
        id: String,
        instance_id: Option<i64>,
        kind: EntityKind,
        definition_id: i64,
        playground_id: i64,
        settings: Settings,
        position: Position,
    ) -> GraphNode {
        let widget_type = encode(kind, definition_id);
        let found = self.catalog.lookup(kind, definition_id);

        let icon = self.catalog.icon_for(kind, definition_id, self.default_icon);

        let widget = self.widgets.resolve(&widget_type).to_string();

        GraphNode {
            id,
            widget_type,
            position,
            data: NodeData {
                playground_id,
                kind,
                instance_id,
                settings,
                definition: found.map(|m| m.definition.clone()),
                icon,
                widget,
            },
        }
    }
}

pub fn edge_for_action_link(link: &ActionLink) -> GraphEdge {
    GraphEdge {
        id: EdgeId::new(LinkKind::Action, link.id).to_string(),
        source: NodeId::action(link.trigger_id).to_string(),
        target: NodeId::reaction(link.reaction_id).to_string(),
    }
}

pub fn edge_for_reaction_link(link: &ReactionLink) -> GraphEdge {
    GraphEdge {
        id: EdgeId::new(LinkKind::Reaction, link.id).to_string(),
        source: NodeId::reaction(link.trigger_id).to_string(),
        target: NodeId::reaction(link.reaction_id).to_string(),
    }
}

/// Rejects playgrounds the graph cannot faithfully represent.
fn validate(playground: &Playground) -> Result<(), LoadError> {
    let mut actions = HashSet::new();
    for action in &playground.actions {
        if !actions.insert(action.id) {
            return Err(LoadError::DuplicateInstance {
                kind: EntityKind::Action,
                id: action.id,
            });
        }
    }

    let mut reactions = HashSet::new();
    for reaction in &playground.reactions {
        if !reactions.insert(reaction.id) {
            return Err(LoadError::DuplicateInstance {
                kind: EntityKind::Reaction,
                id: reaction.id,
            });
        }
    }

    let dangling = |link: LinkKind, id: i64, kind: EntityKind, instance: i64| LoadError::DanglingLink {
        link,
        id,
        kind,
        instance,
    };

    let mut seen = HashSet::new();
    for link in &playground.action_links {
        if !seen.insert(link.id) {
            return Err(LoadError::DuplicateLink { link: LinkKind::Action, id: link.id });
        }
        if !actions.contains(&link.trigger_id) {
            return Err(dangling(LinkKind::Action, link.id, EntityKind::Action, link.trigger_id));
        }
        if !reactions.contains(&link.reaction_id) {
            return Err(dangling(LinkKind::Action, link.id, EntityKind::Reaction, link.reaction_id));
        }
    }

    let mut seen = HashSet::new();
    for link in &playground.reaction_links {
        if !seen.insert(link.id) {
            return Err(LoadError::DuplicateLink { link: LinkKind::Reaction, id: link.id });
        }
        for instance in [link.trigger_id, link.reaction_id] {
            if !reactions.contains(&instance) {
                return Err(dangling(LinkKind::Reaction, link.id, EntityKind::Reaction, instance));
            }
        }
    }

    Ok(())
}
