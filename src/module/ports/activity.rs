//! Activity stream port for reporting issue membership changes.

use crate::module::domain::{
    ActivityDelta, ActorId, IssueId, ModuleId, NewLink, ProjectId, WorkspaceId,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for activity publishing operations.
pub type ActivityPublishResult<T> = Result<T, ActivityPublishError>;

/// Notification describing one bulk assignment of issues to a module.
///
/// Exactly one event is published per bulk assignment, including assignments
/// that changed nothing, so downstream consumers observe every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueActivityEvent {
    /// Workspace the assignment ran in.
    pub workspace_id: WorkspaceId,
    /// Project the module belongs to.
    pub project_id: ProjectId,
    /// Module the issues were assigned to.
    pub module_id: ModuleId,
    /// Member that requested the assignment.
    pub actor_id: ActorId,
    /// Issue ids as requested, before de-duplication.
    pub requested_issue_ids: Vec<IssueId>,
    /// Links created by the assignment.
    pub created: Vec<NewLink>,
    /// Issues moved from another module.
    pub moved: Vec<ActivityDelta>,
}

/// Activity stream contract.
///
/// Publishing is fire-and-forget from the caller's perspective: a failed
/// publish must never fail the triggering operation.
#[async_trait]
pub trait ActivityPublisher: Send + Sync {
    /// Hands an event to the activity stream.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityPublishError`] when the stream rejects the event.
    async fn publish(&self, event: IssueActivityEvent) -> ActivityPublishResult<()>;
}

/// Errors returned by activity publisher implementations.
#[derive(Debug, Clone, Error)]
pub enum ActivityPublishError {
    /// The activity stream has shut down and no longer accepts events.
    #[error("activity stream closed")]
    StreamClosed,

    /// Transport-level failure.
    #[error("activity publish error: {0}")]
    Transport(std::sync::Arc<dyn std::error::Error + Send + Sync>),
}

impl ActivityPublishError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(std::sync::Arc::new(err))
    }
}
