//! Repository ports for module and module-issue link persistence.

use crate::module::domain::{
    IssueId, LinkPlan, Module, ModuleId, ModuleIssueLink, ModuleIssueView, ModuleName, ModuleView,
    ProjectId, RequestContext, WorkspaceId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for module repository operations.
pub type ModuleRepositoryResult<T> = Result<T, ModuleRepositoryError>;

/// Result type for module-issue link repository operations.
pub type LinkRepositoryResult<T> = Result<T, LinkRepositoryError>;

/// Module persistence contract.
///
/// Lookups return materialized [`ModuleView`] aggregates so callers never
/// re-query for leads, members, web links, or linked issues.
#[async_trait]
pub trait ModuleRepository: Send + Sync {
    /// Reports whether the project exists within the workspace.
    async fn project_exists(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
    ) -> ModuleRepositoryResult<bool>;

    /// Stores a new module with its member assignments and returns the
    /// materialized view.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleRepositoryError::NameConflict`] when the project
    /// already has a module with the same name.
    async fn insert(&self, module: &Module) -> ModuleRepositoryResult<ModuleView>;

    /// Finds a module aggregate by identifier.
    ///
    /// Returns `None` when the module does not exist in the project.
    async fn find(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        module_id: ModuleId,
    ) -> ModuleRepositoryResult<Option<Module>>;

    /// Finds a materialized module view by identifier.
    ///
    /// Returns `None` when the module does not exist in the project.
    async fn find_view(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        module_id: ModuleId,
    ) -> ModuleRepositoryResult<Option<ModuleView>>;

    /// Lists materialized views for every module in the project, newest
    /// first.
    async fn list_views(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
    ) -> ModuleRepositoryResult<Vec<ModuleView>>;
}

/// Module-issue link persistence contract.
#[async_trait]
pub trait ModuleIssueRepository: Send + Sync {
    /// Returns the existing links for the given issues, in any order.
    ///
    /// Issues without a link produce no entry.
    async fn find_links_by_issue_ids(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        issue_ids: &[IssueId],
    ) -> LinkRepositoryResult<Vec<ModuleIssueLink>>;

    /// Applies a reconciliation plan atomically.
    ///
    /// Creates insert new links stamped with the context's actor and
    /// `applied_at`; an issue that gained a link concurrently is skipped
    /// rather than duplicated. Moves point existing links at their new
    /// module and restamp the update audit columns.
    async fn apply_plan(
        &self,
        context: &RequestContext,
        project_id: ProjectId,
        plan: &LinkPlan,
        applied_at: DateTime<Utc>,
    ) -> LinkRepositoryResult<()>;

    /// Lists link views for issues currently in the module, newest first,
    /// optionally narrowed to a single issue.
    ///
    /// An unknown module yields an empty list.
    async fn list_views_for_module(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        module_id: ModuleId,
        issue_filter: Option<IssueId>,
    ) -> LinkRepositoryResult<Vec<ModuleIssueView>>;
}

/// Errors returned by module repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ModuleRepositoryError {
    /// A module with the same name already exists in the project.
    #[error("module name already taken: {0}")]
    NameConflict(ModuleName),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ModuleRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Errors returned by module-issue link repository implementations.
#[derive(Debug, Clone, Error)]
pub enum LinkRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl LinkRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
