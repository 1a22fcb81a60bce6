//! Request-scoped identity for module operations.

use super::{ActorId, WorkspaceId};

/// Workspace and acting member on whose behalf an operation runs.
///
/// Services receive the context explicitly rather than reading it from
/// ambient request state, so audit columns and activity events always name
/// the member that triggered the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestContext {
    workspace_id: WorkspaceId,
    actor_id: ActorId,
}

impl RequestContext {
    /// Creates a request context for the given workspace and member.
    #[must_use]
    pub const fn new(workspace_id: WorkspaceId, actor_id: ActorId) -> Self {
        Self {
            workspace_id,
            actor_id,
        }
    }

    /// Returns the workspace the request is scoped to.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the member performing the request.
    #[must_use]
    pub const fn actor_id(&self) -> ActorId {
        self.actor_id
    }
}
