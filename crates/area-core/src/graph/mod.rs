//! Canvas graph: the local projection of a playground.
//!
//! # Module Structure
//!
//! - `models` - node/edge types and incremental updates
//! - `mapper` - playground → graph projection

mod mapper;
mod models;

pub use mapper::{edge_for_action_link, edge_for_reaction_link, Projector};
pub use models::{GraphEdge, GraphNode, GraphSnapshot, NodeData};

use thiserror::Error;

use crate::catalog::{CatalogIndex, WidgetRegistry};
use crate::config::{LayoutConfig, DEFAULT_ICON};
use crate::ident::{EntityKind, LinkKind};
use crate::playground::Playground;

/// A playground snapshot that cannot be projected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("Duplicate {kind} instance id {id}")]
    DuplicateInstance { kind: EntityKind, id: i64 },

    #[error("Duplicate {link} link id {id}")]
    DuplicateLink { link: LinkKind, id: i64 },

    #[error("{link} link {id} references undeclared {kind} {instance}")]
    DanglingLink {
        link: LinkKind,
        id: i64,
        kind: EntityKind,
        instance: i64,
    },
}

/// Projects a playground with the default layout and no widget bindings.
pub fn project(playground: &Playground, catalog: &CatalogIndex) -> Result<GraphSnapshot, LoadError> {
    let widgets = WidgetRegistry::default();
    Projector::new(catalog, &widgets, LayoutConfig::default(), DEFAULT_ICON).project(playground)
}
