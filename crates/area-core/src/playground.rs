use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ident::{EntityKind, LinkKind, NodeId};

/// Opaque key/value configuration attached to a placed action or reaction.
pub type Settings = Value;

/// Returns the settings sent with a freshly placed entity.
pub fn empty_settings() -> Settings {
    Value::Object(serde_json::Map::new())
}

/// A point on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The remote automation project being edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playground {
    pub id: i64,
    #[serde(default)]
    pub actions: Vec<PlaygroundAction>,
    #[serde(default)]
    pub reactions: Vec<PlaygroundReaction>,
    #[serde(default, rename = "linksActions")]
    pub action_links: Vec<ActionLink>,
    #[serde(default, rename = "linksReactions")]
    pub reaction_links: Vec<ReactionLink>,
}

/// An action definition placed into a playground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaygroundAction {
    pub id: i64,
    pub action_id: i64,
    #[serde(default = "empty_settings")]
    pub settings: Settings,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// A reaction definition placed into a playground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaygroundReaction {
    pub id: i64,
    pub reaction_id: i64,
    #[serde(default = "empty_settings")]
    pub settings: Settings,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Link from a playground action to a playground reaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionLink {
    pub id: i64,
    pub trigger_id: i64,
    pub reaction_id: i64,
}

/// Link from a playground reaction to another playground reaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionLink {
    pub id: i64,
    pub trigger_id: i64,
    pub reaction_id: i64,
}

impl Playground {
    /// Returns true if the playground holds an entity for `node`.
    pub fn contains(&self, node: NodeId) -> bool {
        match node.kind {
            EntityKind::Action => self.actions.iter().any(|a| a.id == node.id),
            EntityKind::Reaction => self.reactions.iter().any(|r| r.id == node.id),
        }
    }

    /// Returns true if a `kind` link already joins `source` to `target`.
    pub fn has_link(&self, kind: LinkKind, source: i64, target: i64) -> bool {
        match kind {
            LinkKind::Action => self
                .action_links
                .iter()
                .any(|l| l.trigger_id == source && l.reaction_id == target),
            LinkKind::Reaction => self
                .reaction_links
                .iter()
                .any(|l| l.trigger_id == source && l.reaction_id == target),
        }
    }

    /// Appends a confirmed action.
    pub fn push_action(&mut self, action: PlaygroundAction) {
        let mut actions = self.actions.clone();
        actions.push(action);
        self.actions = actions;
    }

    /// Appends a confirmed reaction.
    pub fn push_reaction(&mut self, reaction: PlaygroundReaction) {
        let mut reactions = self.reactions.clone();
        reactions.push(reaction);
        self.reactions = reactions;
    }

    pub fn push_action_link(&mut self, link: ActionLink) {
        let mut links = self.action_links.clone();
        links.push(link);
        self.action_links = links;
    }

    pub fn push_reaction_link(&mut self, link: ReactionLink) {
        let mut links = self.reaction_links.clone();
        links.push(link);
        self.reaction_links = links;
    }

    /// Removes an entity and every link touching it.
    ///
    /// Returns false if nothing matched.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if !self.contains(node) {
            return false;
        }

        match node.kind {
            EntityKind::Action => {
                self.actions = self.actions.iter().filter(|a| a.id != node.id).cloned().collect();
                self.action_links = self
                    .action_links
                    .iter()
                    .filter(|l| l.trigger_id != node.id)
                    .cloned()
                    .collect();
            }
            EntityKind::Reaction => {
                self.reactions = self.reactions.iter().filter(|r| r.id != node.id).cloned().collect();
                self.action_links = self
                    .action_links
                    .iter()
                    .filter(|l| l.reaction_id != node.id)
                    .cloned()
                    .collect();
                self.reaction_links = self
                    .reaction_links
                    .iter()
                    .filter(|l| l.trigger_id != node.id && l.reaction_id != node.id)
                    .cloned()
                    .collect();
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Playground {
        serde_json::from_str(
            r#"{
                "id": 1,
                "actions": [{"id": 7, "actionId": 1, "settings": {}, "x": 10.0, "y": 20.0}],
                "reactions": [
                    {"id": 3, "reactionId": 2, "settings": {"url": "https://example.com"}},
                    {"id": 9, "reactionId": 2}
                ],
                "linksActions": [{"id": 1, "triggerId": 7, "reactionId": 3}],
                "linksReactions": [{"id": 2, "triggerId": 3, "reactionId": 9}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deserialize_wire_format() {
        let pg = sample();
        assert_eq!(pg.actions[0].action_id, 1);
        assert_eq!(pg.reactions[1].settings, empty_settings());
        assert_eq!(pg.action_links[0].trigger_id, 7);
        assert_eq!(pg.reaction_links[0].reaction_id, 9);
    }

    #[test]
    fn test_contains() {
        let pg = sample();
        assert!(pg.contains(NodeId::action(7)));
        assert!(!pg.contains(NodeId::reaction(7)));
    }

    #[test]
    fn test_has_link() {
        let pg = sample();
        assert!(pg.has_link(LinkKind::Action, 7, 3));
        assert!(pg.has_link(LinkKind::Reaction, 3, 9));
        assert!(!pg.has_link(LinkKind::Action, 7, 9));
        assert!(!pg.has_link(LinkKind::Reaction, 9, 3));
    }

    #[test]
    fn test_remove_reaction_drops_links() {
        let mut pg = sample();
        assert!(pg.remove(NodeId::reaction(3)));
        assert_eq!(pg.reactions.len(), 1);
        assert!(pg.action_links.is_empty());
        assert!(pg.reaction_links.is_empty());
        assert!(!pg.remove(NodeId::reaction(3)));
    }
}
