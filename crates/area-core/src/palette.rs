//! Command palette: catalog listing that inserts nodes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::catalog::PaletteEntry;
use crate::error::EditorError;
use crate::gateway::MutationGateway;
use crate::graph::GraphNode;
use crate::ident::TempIdGenerator;
use crate::playground::Position;

pub struct CommandPalette {
    gateway: Arc<MutationGateway>,
    ids: Arc<TempIdGenerator>,
    default_position: Position,
    open: AtomicBool,
}

impl CommandPalette {
    pub fn new(gateway: Arc<MutationGateway>, ids: Arc<TempIdGenerator>, default_position: Position) -> Self {
        Self {
            gateway,
            ids,
            default_position,
            open: AtomicBool::new(false),
        }
    }

    pub fn open(&self) {
        self.open.store(true, Ordering::Release);
    }

    pub fn close(&self) {
        self.open.store(false, Ordering::Release);
    }

    /// Flips the palette, as the keyboard shortcut does. Returns the new state.
    pub fn toggle(&self) -> bool {
        !self.open.fetch_xor(true, Ordering::AcqRel)
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Every placeable definition, grouped by service.
    pub fn entries(&self) -> Vec<PaletteEntry> {
        self.gateway.catalog().palette_entries()
    }

    /// Shows a pending node for `entry` at `position` and creates the
    /// instance behind it.
    ///
    /// Shared by drag-and-drop and palette selection.
    pub async fn place(&self, entry: &PaletteEntry, position: Position) -> Result<Option<GraphNode>, EditorError> {
        let pending_id = self.ids.next_id();
        let node = self
            .gateway
            .projector()
            .pending_node(pending_id.clone(), self.gateway.playground_id(), entry, position);
        self.gateway.show_pending(node).await;

        self.gateway
            .create_node(entry.kind, entry.definition.id, position, Some(&pending_id))
            .await
    }

    /// Inserts `entry` at the default position, closing the palette on
    /// success. A failed insertion leaves it open.
    pub async fn insert_from_catalog(&self, entry: &PaletteEntry) -> Result<Option<GraphNode>, EditorError> {
        let node = self.place(entry, self.default_position).await?;
        self.close();
        debug!(definition = entry.definition.id, kind = %entry.kind, "palette insertion done");
        Ok(node)
    }
}
