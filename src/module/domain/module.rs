//! Module aggregate root and related module lifecycle types.

use super::{
    ActorId, ModuleDomainError, ModuleId, ModuleName, ParseModuleStatusError, ProjectId,
    RequestContext, WorkspaceId,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Module lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleStatus {
    /// Module has been sketched out but not scheduled.
    Backlog,
    /// Module is scheduled for an upcoming period.
    #[default]
    Planned,
    /// Module work is underway.
    InProgress,
    /// Module work is temporarily paused.
    Paused,
    /// Module work has been completed.
    Completed,
    /// Module has been abandoned.
    Cancelled,
}

impl ModuleStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Planned => "planned",
            Self::InProgress => "in-progress",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<&str> for ModuleStatus {
    type Error = ParseModuleStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "backlog" => Ok(Self::Backlog),
            "planned" => Ok(Self::Planned),
            "in-progress" => Ok(Self::InProgress),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseModuleStatusError(value.to_owned())),
        }
    }
}

/// Requested attributes for a module that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDraft {
    /// Project the module belongs to.
    pub project_id: ProjectId,
    /// Validated display name.
    pub name: ModuleName,
    /// Free-form description, if any.
    pub description: Option<String>,
    /// Initial lifecycle status.
    pub status: ModuleStatus,
    /// Member leading the module, if any.
    pub lead: Option<ActorId>,
    /// Members assigned to the module.
    pub members: Vec<ActorId>,
    /// Date work is scheduled to start, if any.
    pub start_date: Option<NaiveDate>,
    /// Date work is expected to finish, if any.
    pub target_date: Option<NaiveDate>,
}

/// Module aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    id: ModuleId,
    workspace_id: WorkspaceId,
    project_id: ProjectId,
    name: ModuleName,
    description: Option<String>,
    status: ModuleStatus,
    lead: Option<ActorId>,
    members: Vec<ActorId>,
    start_date: Option<NaiveDate>,
    target_date: Option<NaiveDate>,
    created_by: ActorId,
    updated_by: ActorId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted module aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedModuleData {
    /// Persisted module identifier.
    pub id: ModuleId,
    /// Persisted workspace identifier.
    pub workspace_id: WorkspaceId,
    /// Persisted project identifier.
    pub project_id: ProjectId,
    /// Persisted display name.
    pub name: ModuleName,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted lifecycle status.
    pub status: ModuleStatus,
    /// Persisted lead, if any.
    pub lead: Option<ActorId>,
    /// Persisted member assignments.
    pub members: Vec<ActorId>,
    /// Persisted start date, if any.
    pub start_date: Option<NaiveDate>,
    /// Persisted target date, if any.
    pub target_date: Option<NaiveDate>,
    /// Member that created the module.
    pub created_by: ActorId,
    /// Member that last updated the module.
    pub updated_by: ActorId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Module {
    /// Creates a new module from a draft on behalf of the requesting member.
    ///
    /// Duplicate member assignments collapse to the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleDomainError::TargetBeforeStart`] if both dates are set
    /// and the target date precedes the start date.
    pub fn create(
        draft: ModuleDraft,
        context: &RequestContext,
        clock: &impl Clock,
    ) -> Result<Self, ModuleDomainError> {
        if let (Some(start), Some(target)) = (draft.start_date, draft.target_date)
            && target < start
        {
            return Err(ModuleDomainError::TargetBeforeStart { start, target });
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: ModuleId::new(),
            workspace_id: context.workspace_id(),
            project_id: draft.project_id,
            name: draft.name,
            description: draft.description,
            status: draft.status,
            lead: draft.lead,
            members: dedupe_members(draft.members),
            start_date: draft.start_date,
            target_date: draft.target_date,
            created_by: context.actor_id(),
            updated_by: context.actor_id(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a module from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedModuleData) -> Self {
        Self {
            id: data.id,
            workspace_id: data.workspace_id,
            project_id: data.project_id,
            name: data.name,
            description: data.description,
            status: data.status,
            lead: data.lead,
            members: data.members,
            start_date: data.start_date,
            target_date: data.target_date,
            created_by: data.created_by,
            updated_by: data.updated_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the module identifier.
    #[must_use]
    pub const fn id(&self) -> ModuleId {
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

    /// Returns the module display name.
    #[must_use]
    pub const fn name(&self) -> &ModuleName {
        &self.name
    }

    /// Returns the module description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the module lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ModuleStatus {
        self.status
    }

    /// Returns the module lead, if any.
    #[must_use]
    pub const fn lead(&self) -> Option<ActorId> {
        self.lead
    }

    /// Returns the members assigned to the module.
    #[must_use]
    pub fn members(&self) -> &[ActorId] {
        &self.members
    }

    /// Returns the scheduled start date, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the expected completion date, if any.
    #[must_use]
    pub const fn target_date(&self) -> Option<NaiveDate> {
        self.target_date
    }

    /// Returns the member that created the module.
    #[must_use]
    pub const fn created_by(&self) -> ActorId {
        self.created_by
    }

    /// Returns the member that last updated the module.
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
}

/// Removes duplicate member assignments, keeping first occurrences in order.
fn dedupe_members(members: Vec<ActorId>) -> Vec<ActorId> {
    let mut seen = std::collections::HashSet::with_capacity(members.len());
    members
        .into_iter()
        .filter(|member| seen.insert(*member))
        .collect()
}
