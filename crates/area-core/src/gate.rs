//! Deletion confirmation gate.
//!
//! A deletion gesture parks on the gate until the user confirms or cancels
//! it. The gate holds at most one pending decision: a second request while
//! one is waiting is refused with [`EditorError::GateBusy`] and the first
//! one is left untouched.

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::{oneshot, watch};
use tracing::debug;

use crate::error::EditorError;

/// What the user is being asked to delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionRequest {
    pub nodes: Vec<String>,
    pub edges: Vec<String>,
}

impl DeletionRequest {
    pub fn new(nodes: Vec<String>, edges: Vec<String>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// How a pending deletion was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GateState {
    Idle,
    AwaitingConfirmation,
}

/// Awaiting side of a deletion request.
#[derive(Debug)]
pub struct PendingDecision {
    rx: oneshot::Receiver<Decision>,
}

impl PendingDecision {
    /// Resolves once the request is confirmed, cancelled or dismissed.
    ///
    /// A gate dropped without an answer counts as a cancellation.
    pub async fn wait(self) -> Decision {
        self.rx.await.unwrap_or(Decision::Cancelled)
    }
}

/// Single-slot confirmation mailbox.
pub struct DeletionGate {
    slot: Mutex<Option<oneshot::Sender<Decision>>>,
    pending: watch::Sender<Option<DeletionRequest>>,
}

impl Default for DeletionGate {
    fn default() -> Self {
        Self::new()
    }
}

impl DeletionGate {
    pub fn new() -> Self {
        let (pending, _) = watch::channel(None);
        Self {
            slot: Mutex::new(None),
            pending,
        }
    }

    /// Parks a deletion request until it is resolved.
    pub fn request(&self, request: DeletionRequest) -> Result<PendingDecision, EditorError> {
        let mut slot = self.slot.lock();

        // A waiter that went away no longer blocks the slot.
        if slot.as_ref().is_some_and(|tx| !tx.is_closed()) {
            return Err(EditorError::GateBusy);
        }

        let (tx, rx) = oneshot::channel();
        *slot = Some(tx);
        debug!(nodes = request.nodes.len(), edges = request.edges.len(), "deletion awaiting confirmation");
        self.pending.send_replace(Some(request));

        Ok(PendingDecision { rx })
    }

    /// Confirms the pending request. Returns false if nothing was pending.
    pub fn confirm(&self) -> bool {
        self.resolve(Decision::Confirmed)
    }

    /// Cancels the pending request. Returns false if nothing was pending.
    pub fn cancel(&self) -> bool {
        self.resolve(Decision::Cancelled)
    }

    /// Closing the prompt without answering cancels.
    pub fn dismiss(&self) -> bool {
        self.resolve(Decision::Cancelled)
    }

    fn resolve(&self, decision: Decision) -> bool {
        let Some(tx) = self.slot.lock().take() else {
            return false;
        };
        self.pending.send_replace(None);
        debug!(?decision, "deletion resolved");
        tx.send(decision).is_ok()
    }

    pub fn state(&self) -> GateState {
        match self.slot.lock().as_ref() {
            Some(tx) if !tx.is_closed() => GateState::AwaitingConfirmation,
            _ => GateState::Idle,
        }
    }

    /// The request currently shown to the user, if any.
    pub fn pending(&self) -> Option<DeletionRequest> {
        if self.state() == GateState::Idle {
            return None;
        }
        self.pending.borrow().clone()
    }

    /// Watches the pending request, e.g. to present the prompt.
    pub fn subscribe(&self) -> watch::Receiver<Option<DeletionRequest>> {
        self.pending.subscribe()
    }
}
