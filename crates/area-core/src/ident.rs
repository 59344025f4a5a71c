//! Composite identifiers shared by graph nodes, edges and mutation routing.
//!
//! A node is addressed as `<kind>:<instanceId>` (e.g. `action:7`) and an edge
//! as `link:<kind>:<linkId>` (e.g. `link:reaction:12`). The kind prefix is what
//! lets the editor route a gesture to the right backend call without a side
//! lookup table.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between the kind prefix and the numeric id.
pub const SEPARATOR: char = ':';

/// Prefix carried by every edge identifier.
pub const LINK_PREFIX: &str = "link";

/// Errors raised while decoding a composite identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("Malformed identifier '{input}': {reason}")]
    Malformed { input: String, reason: &'static str },
}

impl IdentifierError {
    fn malformed(input: &str, reason: &'static str) -> Self {
        IdentifierError::Malformed {
            input: input.to_string(),
            reason,
        }
    }
}

/// Kind of entity a graph node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A trigger placed in the playground.
    Action,
    /// A response placed in the playground.
    Reaction,
}

impl EntityKind {
    /// Returns the prefix used in composite identifiers.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Action => "action",
            EntityKind::Reaction => "reaction",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "action" => Ok(EntityKind::Action),
            "reaction" => Ok(EntityKind::Reaction),
            _ => Err(IdentifierError::malformed(s, "unknown entity kind")),
        }
    }
}

/// Decoded form of a node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub kind: EntityKind,
    pub id: i64,
}

impl NodeId {
    pub fn new(kind: EntityKind, id: i64) -> Self {
        Self { kind, id }
    }

    pub fn action(id: i64) -> Self {
        Self::new(EntityKind::Action, id)
    }

    pub fn reaction(id: i64) -> Self {
        Self::new(EntityKind::Reaction, id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.kind, SEPARATOR, self.id)
    }
}

impl FromStr for NodeId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

/// Encodes `(kind, id)` as `<kind>:<id>`.
pub fn encode(kind: EntityKind, id: i64) -> String {
    NodeId::new(kind, id).to_string()
}

/// Decodes `<kind>:<id>`, splitting on the first separator.
pub fn decode(input: &str) -> Result<NodeId, IdentifierError> {
    let (kind, id) = input
        .split_once(SEPARATOR)
        .ok_or_else(|| IdentifierError::malformed(input, "missing ':' separator"))?;

    let kind = kind
        .parse::<EntityKind>()
        .map_err(|_| IdentifierError::malformed(input, "unknown entity kind"))?;

    let id = id
        .parse::<i64>()
        .map_err(|_| IdentifierError::malformed(input, "id is not an integer"))?;

    Ok(NodeId { kind, id })
}

/// Kind of link an edge stands for.
///
/// The remote model has two link tables, keyed by the kind of the
/// triggering side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// action → reaction
    Action,
    /// reaction → reaction
    Reaction,
}

impl LinkKind {
    /// Returns the link kind a `source → target` connection maps to, or
    /// `None` when the pair is not supported.
    pub fn for_pair(source: EntityKind, target: EntityKind) -> Option<Self> {
        match (source, target) {
            (EntityKind::Action, EntityKind::Reaction) => Some(LinkKind::Action),
            (EntityKind::Reaction, EntityKind::Reaction) => Some(LinkKind::Reaction),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LinkKind::Action => "action",
            LinkKind::Reaction => "reaction",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded form of an edge identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId {
    pub kind: LinkKind,
    pub id: i64,
}

impl EdgeId {
    pub fn new(kind: LinkKind, id: i64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{LINK_PREFIX}{SEPARATOR}{}{SEPARATOR}{}", self.kind, self.id)
    }
}

impl FromStr for EdgeId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(LINK_PREFIX)
            .and_then(|r| r.strip_prefix(SEPARATOR))
            .ok_or_else(|| IdentifierError::malformed(s, "missing 'link:' prefix"))?;

        // The remainder has the same shape as a node id.
        let inner = decode(rest).map_err(|_| IdentifierError::malformed(s, "bad link kind or id"))?;
        let kind = match inner.kind {
            EntityKind::Action => LinkKind::Action,
            EntityKind::Reaction => LinkKind::Reaction,
        };

        Ok(EdgeId { kind, id: inner.id })
    }
}

/// Prefix of node ids awaiting backend confirmation.
pub const PENDING_PREFIX: &str = "pending";

/// Issues `pending:<n>` ids for nodes shown before the backend confirms them.
///
/// One generator lives per editing session. Pending ids never decode as
/// entity ids, so nothing routes a remote call to them.
#[derive(Debug, Default)]
pub struct TempIdGenerator {
    next: AtomicU64,
}

impl TempIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{PENDING_PREFIX}{SEPARATOR}{n}")
    }
}

/// Returns true for ids issued by a [`TempIdGenerator`].
pub fn is_pending(id: &str) -> bool {
    id.strip_prefix(PENDING_PREFIX)
        .is_some_and(|rest| rest.starts_with(SEPARATOR))
}
