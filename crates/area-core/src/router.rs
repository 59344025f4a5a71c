//! Turns a connect gesture into the matching link creation.

use std::sync::Arc;

use tracing::{error, warn};

use crate::error::EditorError;
use crate::gateway::MutationGateway;
use crate::graph::GraphEdge;
use crate::ident::{decode, LinkKind, NodeId};

pub struct ConnectionRouter {
    gateway: Arc<MutationGateway>,
}

impl ConnectionRouter {
    pub fn new(gateway: Arc<MutationGateway>) -> Self {
        Self { gateway }
    }

    /// Connects `source` to `target`.
    ///
    /// `action → reaction` becomes an action link and `reaction → reaction`
    /// a reaction link. Anything else is rejected before any remote call.
    pub async fn connect(&self, source: &str, target: &str) -> Result<GraphEdge, EditorError> {
        let (kind, from, to) = match self.route(source, target).await {
            Ok(route) => route,
            Err(err) => {
                warn!(source, target, error = %err, "connection rejected");
                return Err(err);
            }
        };

        self.gateway
            .create_link(kind, from, to)
            .await
            .inspect_err(|err| error!(source, target, error = %err, "link creation failed"))
    }

    async fn route(&self, source: &str, target: &str) -> Result<(LinkKind, NodeId, NodeId), EditorError> {
        let invalid = |reason: &str| EditorError::invalid_connection(source, target, reason);

        let from = decode(source).map_err(|_| invalid("source is not a placed entity"))?;
        let to = decode(target).map_err(|_| invalid("target is not a placed entity"))?;

        let kind = LinkKind::for_pair(from.kind, to.kind).ok_or_else(|| {
            invalid(&format!("{} cannot trigger {}", from.kind, to.kind))
        })?;

        let state = self.gateway.state().read().await;
        if !state.playground.contains(from) {
            return Err(invalid("source is not in the playground"));
        }
        if !state.playground.contains(to) {
            return Err(invalid("target is not in the playground"));
        }
        if state.playground.has_link(kind, from.id, to.id) {
            return Err(invalid("already linked"));
        }

        Ok((kind, from, to))
    }
}
