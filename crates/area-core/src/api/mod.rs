mod error;
mod http;

pub use error::ApiError;
pub use http::HttpPlaygroundClient;

use std::fmt;

use async_trait::async_trait;

use crate::playground::{
    ActionLink, PlaygroundAction, PlaygroundReaction, ReactionLink, Settings,
};

/// Remote calls the editor issues, named for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteCall {
    AddActionToPlayground,
    AddReactionToPlayground,
    DeleteActionFromPlayground,
    DeleteReactionFromPlayground,
    AddActionToReactionLink,
    AddReactionToReactionLink,
}

impl RemoteCall {
    pub fn name(self) -> &'static str {
        match self {
            RemoteCall::AddActionToPlayground => "addActionToPlayground",
            RemoteCall::AddReactionToPlayground => "addReactionToPlayground",
            RemoteCall::DeleteActionFromPlayground => "deleteActionFromPlayground",
            RemoteCall::DeleteReactionFromPlayground => "deleteReactionFromPlayground",
            RemoteCall::AddActionToReactionLink => "addActionToReactionLink",
            RemoteCall::AddReactionToReactionLink => "addReactionToReactionLink",
        }
    }
}

impl fmt::Display for RemoteCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The playground backend, as seen by the editor.
///
/// Every call may fail; the editor decides what to do with local state
/// based on the outcome. Implementations must be usable from several
/// in-flight gestures at once.
///
/// # Example
///
/// ```ignore
/// use area_core::api::{HttpPlaygroundClient, PlaygroundApi};
/// use area_core::playground::empty_settings;
///
/// let api = HttpPlaygroundClient::new("http://localhost:8080", "token");
/// let action = api.add_action_to_playground(1, 4, &empty_settings(), 0.0, 0.0).await?;
/// ```
#[async_trait]
pub trait PlaygroundApi: Send + Sync {
    /// Places an action definition into a playground.
    async fn add_action_to_playground(
        &self,
        playground_id: i64,
        definition_id: i64,
        settings: &Settings,
        x: f64,
        y: f64,
    ) -> Result<PlaygroundAction, ApiError>;

    /// Places a reaction definition into a playground.
    async fn add_reaction_to_playground(
        &self,
        playground_id: i64,
        definition_id: i64,
        settings: &Settings,
        x: f64,
        y: f64,
    ) -> Result<PlaygroundReaction, ApiError>;

    async fn delete_action_from_playground(
        &self,
        playground_id: i64,
        instance_id: i64,
    ) -> Result<(), ApiError>;

    async fn delete_reaction_from_playground(
        &self,
        playground_id: i64,
        instance_id: i64,
    ) -> Result<(), ApiError>;

    /// Links a playground action to a playground reaction.
    async fn add_action_to_reaction_link(
        &self,
        source_instance_id: i64,
        target_instance_id: i64,
    ) -> Result<ActionLink, ApiError>;

    /// Links a playground reaction to another playground reaction.
    async fn add_reaction_to_reaction_link(
        &self,
        source_instance_id: i64,
        target_instance_id: i64,
    ) -> Result<ReactionLink, ApiError>;
}
