//! Shared fixtures: a recording in-memory backend and a small catalog.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Notify;

use area_core::api::{ApiError, PlaygroundApi, RemoteCall};
use area_core::catalog::{Definition, PaletteEntry, Service};
use area_core::playground::{
    ActionLink, Playground, PlaygroundAction, PlaygroundReaction, ReactionLink, Settings,
};
use area_core::{CatalogIndex, Config, EditorSession, EntityKind};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub call: RemoteCall,
    pub args: (i64, i64),
}

/// Holds a call in flight until released.
pub struct Latch {
    pub entered: Notify,
    pub release: Notify,
}

/// In-memory `PlaygroundApi` that records every call.
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    failing: Mutex<HashSet<RemoteCall>>,
    latch: Mutex<Option<Arc<Latch>>>,
    next_id: AtomicI64,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            latch: Mutex::new(None),
            next_id: AtomicI64::new(100),
        })
    }

    /// Makes every subsequent `call` fail with a 500.
    pub fn fail(&self, call: RemoteCall) {
        self.failing.lock().unwrap().insert(call);
    }

    /// Parks the next call until `release` is notified.
    pub fn hold_next(&self) -> Arc<Latch> {
        let latch = Arc::new(Latch {
            entered: Notify::new(),
            release: Notify::new(),
        });
        *self.latch.lock().unwrap() = Some(latch.clone());
        latch
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: RemoteCall) -> usize {
        self.calls().iter().filter(|c| c.call == call).count()
    }

    async fn record(&self, call: RemoteCall, args: (i64, i64)) -> Result<i64, ApiError> {
        self.calls.lock().unwrap().push(Call { call, args });

        let latch = self.latch.lock().unwrap().take();
        if let Some(latch) = latch {
            latch.entered.notify_one();
            latch.release.notified().await;
        }

        if self.failing.lock().unwrap().contains(&call) {
            return Err(ApiError::Status {
                status: 500,
                message: "internal error".to_string(),
            });
        }
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl PlaygroundApi for FakeApi {
    async fn add_action_to_playground(
        &self,
        playground_id: i64,
        definition_id: i64,
        settings: &Settings,
        x: f64,
        y: f64,
    ) -> Result<PlaygroundAction, ApiError> {
        let id = self
            .record(RemoteCall::AddActionToPlayground, (playground_id, definition_id))
            .await?;
        Ok(PlaygroundAction {
            id,
            action_id: definition_id,
            settings: settings.clone(),
            x,
            y,
        })
    }

    async fn add_reaction_to_playground(
        &self,
        playground_id: i64,
        definition_id: i64,
        settings: &Settings,
        x: f64,
        y: f64,
    ) -> Result<PlaygroundReaction, ApiError> {
        let id = self
            .record(RemoteCall::AddReactionToPlayground, (playground_id, definition_id))
            .await?;
        Ok(PlaygroundReaction {
            id,
            reaction_id: definition_id,
            settings: settings.clone(),
            x,
            y,
        })
    }

    async fn delete_action_from_playground(&self, playground_id: i64, instance_id: i64) -> Result<(), ApiError> {
        self.record(RemoteCall::DeleteActionFromPlayground, (playground_id, instance_id))
            .await
            .map(|_| ())
    }

    async fn delete_reaction_from_playground(&self, playground_id: i64, instance_id: i64) -> Result<(), ApiError> {
        self.record(RemoteCall::DeleteReactionFromPlayground, (playground_id, instance_id))
            .await
            .map(|_| ())
    }

    async fn add_action_to_reaction_link(&self, source: i64, target: i64) -> Result<ActionLink, ApiError> {
        let id = self.record(RemoteCall::AddActionToReactionLink, (source, target)).await?;
        Ok(ActionLink {
            id,
            trigger_id: source,
            reaction_id: target,
        })
    }

    async fn add_reaction_to_reaction_link(&self, source: i64, target: i64) -> Result<ReactionLink, ApiError> {
        let id = self.record(RemoteCall::AddReactionToReactionLink, (source, target)).await?;
        Ok(ReactionLink {
            id,
            trigger_id: source,
            reaction_id: target,
        })
    }
}

pub fn definition(id: i64, name: &str) -> Definition {
    Definition {
        id,
        name: name.to_string(),
        description: None,
        settings: json!({}),
    }
}

/// Two services: a webhook service and a chat service.
pub fn services() -> Vec<Service> {
    vec![
        Service {
            name: "Webhook".to_string(),
            icon: Some("Webhook".to_string()),
            actions: vec![definition(4, "On Fetch")],
            reactions: vec![definition(9, "Fetch Request")],
        },
        Service {
            name: "Discord".to_string(),
            icon: Some("Discord".to_string()),
            actions: vec![definition(5, "On Message")],
            reactions: vec![definition(10, "Send Message")],
        },
    ]
}

/// Playground 1: action 7 linked to reaction 3, plus an unlinked reaction 9.
pub fn playground() -> Playground {
    Playground {
        id: 1,
        actions: vec![PlaygroundAction {
            id: 7,
            action_id: 4,
            settings: json!({}),
            x: 0.0,
            y: 0.0,
        }],
        reactions: vec![
            PlaygroundReaction {
                id: 3,
                reaction_id: 9,
                settings: json!({ "url": "https://example.org" }),
                x: 0.0,
                y: 0.0,
            },
            PlaygroundReaction {
                id: 9,
                reaction_id: 10,
                settings: json!({}),
                x: 0.0,
                y: 0.0,
            },
        ],
        action_links: vec![ActionLink {
            id: 1,
            trigger_id: 7,
            reaction_id: 3,
        }],
        reaction_links: vec![],
    }
}

pub fn entry(kind: EntityKind, definition_id: i64) -> PaletteEntry {
    CatalogIndex::new(services())
        .entry(kind, definition_id)
        .expect("fixture definition exists")
}

/// Opens a session on [`playground`] with the default config.
pub fn start(api: &Arc<FakeApi>) -> Arc<EditorSession> {
    start_with(api, &Config::default())
}

pub fn start_with(api: &Arc<FakeApi>, config: &Config) -> Arc<EditorSession> {
    let session = EditorSession::start(playground(), services(), api.clone(), config)
        .expect("fixture playground loads");
    Arc::new(session)
}
