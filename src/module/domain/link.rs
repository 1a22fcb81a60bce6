//! Module-issue link aggregate recording which module an issue belongs to.

use super::{ActorId, IssueId, LinkId, ModuleId, ProjectId, WebLinkId, WorkspaceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Link between an issue and the module it currently belongs to.
///
/// Each issue holds at most one link within a project. Moving an issue to a
/// different module mutates the existing link rather than creating a second
/// one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleIssueLink {
    id: LinkId,
    workspace_id: WorkspaceId,
    project_id: ProjectId,
    module_id: ModuleId,
    issue_id: IssueId,
    created_by: ActorId,
    updated_by: ActorId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted module-issue link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedLinkData {
    /// Persisted link identifier.
    pub id: LinkId,
    /// Persisted workspace identifier.
    pub workspace_id: WorkspaceId,
    /// Persisted project identifier.
    pub project_id: ProjectId,
    /// Module the issue currently belongs to.
    pub module_id: ModuleId,
    /// Linked issue identifier.
    pub issue_id: IssueId,
    /// Member that created the link.
    pub created_by: ActorId,
    /// Member that last moved the link.
    pub updated_by: ActorId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ModuleIssueLink {
    /// Creates a fresh link placing an issue into a module.
    ///
    /// Both audit columns are stamped with the creating member and
    /// `created_at`.
    #[must_use]
    pub fn new(
        module_id: ModuleId,
        issue_id: IssueId,
        project_id: ProjectId,
        workspace_id: WorkspaceId,
        created_by: ActorId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: LinkId::new(),
            workspace_id,
            project_id,
            module_id,
            issue_id,
            created_by,
            updated_by: created_by,
            created_at,
            updated_at: created_at,
        }
    }

    /// Reconstructs a link from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedLinkData) -> Self {
        Self {
            id: data.id,
            workspace_id: data.workspace_id,
            project_id: data.project_id,
            module_id: data.module_id,
            issue_id: data.issue_id,
            created_by: data.created_by,
            updated_by: data.updated_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the link identifier.
    #[must_use]
    pub const fn id(&self) -> LinkId {
        self.id
    }

    /// Returns the owning workspace identifier.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the module the issue currently belongs to.
    #[must_use]
    pub const fn module_id(&self) -> ModuleId {
        self.module_id
    }

    /// Returns the linked issue identifier.
    #[must_use]
    pub const fn issue_id(&self) -> IssueId {
        self.issue_id
    }

    /// Returns the member that created the link.
    #[must_use]
    pub const fn created_by(&self) -> ActorId {
        self.created_by
    }

    /// Returns the member that last moved the link.
    #[must_use]
    pub const fn updated_by(&self) -> ActorId {
        self.updated_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the link to a different module, restamping the update audit
    /// columns.
    pub fn reassign(
        &mut self,
        module_id: ModuleId,
        updated_by: ActorId,
        updated_at: DateTime<Utc>,
    ) {
        self.module_id = module_id;
        self.updated_by = updated_by;
        self.updated_at = updated_at;
    }
}

/// External link attached to a module, such as a design document.
///
/// Web links are managed elsewhere and surface here read-only as part of
/// module views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleWebLink {
    /// Web link identifier.
    pub id: WebLinkId,
    /// Module the link is attached to.
    pub module_id: ModuleId,
    /// Human-readable link title.
    pub title: String,
    /// Link destination URL.
    pub url: String,
}
