//! Service layer for module creation, lookup, and bulk issue assignment.

use crate::module::{
    domain::{
        ActorId, IssueId, Module, ModuleDomainError, ModuleDraft, ModuleId, ModuleIssueView,
        ModuleName, ModuleStatus, ModuleView, ProjectId, RequestContext, reconcile,
    },
    ports::{
        ActivityPublisher, FaultMonitor, IssueActivityEvent, ModuleIssueRepository,
        ModuleRepository, ModuleRepositoryError,
    },
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateModuleRequest {
    name: String,
    description: Option<String>,
    status: ModuleStatus,
    lead: Option<ActorId>,
    members: Vec<ActorId>,
    start_date: Option<NaiveDate>,
    target_date: Option<NaiveDate>,
}

impl CreateModuleRequest {
    /// Creates a request with the required module name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            status: ModuleStatus::default(),
            lead: None,
            members: Vec::new(),
            start_date: None,
            target_date: None,
        }
    }

    /// Sets the module description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial lifecycle status.
    #[must_use]
    pub const fn with_status(mut self, status: ModuleStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the module lead.
    #[must_use]
    pub const fn with_lead(mut self, lead: ActorId) -> Self {
        self.lead = Some(lead);
        self
    }

    /// Sets the assigned members.
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = ActorId>) -> Self {
        self.members = members.into_iter().collect();
        self
    }

    /// Sets the scheduled start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the expected completion date.
    #[must_use]
    pub const fn with_target_date(mut self, target_date: NaiveDate) -> Self {
        self.target_date = Some(target_date);
        self
    }
}

/// Service-level errors for module operations.
#[derive(Debug, Error)]
pub enum ModuleServiceError {
    /// The project does not exist in the workspace.
    #[error("project was not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The module does not exist in the project.
    #[error("module does not exist: {0}")]
    ModuleNotFound(ModuleId),

    /// A bulk assignment was requested with no issue ids.
    #[error("at least one issue id is required")]
    EmptyIssueList,

    /// The project already has a module with the requested name.
    #[error("module name already taken: {0}")]
    NameConflict(ModuleName),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ModuleDomainError),

    /// An infrastructure fault occurred; the cause has been reported to the
    /// fault monitor.
    #[error("something went wrong, please try again later")]
    Unexpected(#[source] Arc<dyn std::error::Error + Send + Sync>),
}

/// Result type for module service operations.
pub type ModuleServiceResult<T> = Result<T, ModuleServiceError>;

/// Module orchestration service.
#[derive(Clone)]
pub struct ModuleService<R, L, A, F, C>
where
    R: ModuleRepository,
    L: ModuleIssueRepository,
    A: ActivityPublisher,
    F: FaultMonitor,
    C: Clock + Send + Sync,
{
    modules: Arc<R>,
    links: Arc<L>,
    activity: Arc<A>,
    monitor: Arc<F>,
    clock: Arc<C>,
}

impl<R, L, A, F, C> ModuleService<R, L, A, F, C>
where
    R: ModuleRepository,
    L: ModuleIssueRepository,
    A: ActivityPublisher,
    F: FaultMonitor,
    C: Clock + Send + Sync,
{
    /// Creates a new module service.
    #[must_use]
    pub const fn new(
        modules: Arc<R>,
        links: Arc<L>,
        activity: Arc<A>,
        monitor: Arc<F>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            modules,
            links,
            activity,
            monitor,
            clock,
        }
    }

    /// Creates a module in the project and returns its materialized view.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleServiceError::ProjectNotFound`] when the project does
    /// not exist, [`ModuleServiceError::Domain`] when validation fails,
    /// [`ModuleServiceError::NameConflict`] when the name is already taken
    /// within the project, or [`ModuleServiceError::Unexpected`] on
    /// infrastructure faults.
    pub async fn create_module(
        &self,
        context: &RequestContext,
        project_id: ProjectId,
        request: CreateModuleRequest,
    ) -> ModuleServiceResult<ModuleView> {
        let project_known = self
            .modules
            .project_exists(context.workspace_id(), project_id)
            .await
            .map_err(|error| self.unexpected("create_module", error))?;
        if !project_known {
            return Err(ModuleServiceError::ProjectNotFound(project_id));
        }

        let name = ModuleName::new(request.name)?;
        let draft = ModuleDraft {
            project_id,
            name,
            description: request.description,
            status: request.status,
            lead: request.lead,
            members: request.members,
            start_date: request.start_date,
            target_date: request.target_date,
        };
        let module = Module::create(draft, context, &*self.clock)?;

        match self.modules.insert(&module).await {
            Ok(view) => {
                tracing::debug!("Created module {} in project {}", view.module.id(), project_id);
                Ok(view)
            }
            Err(ModuleRepositoryError::NameConflict(name)) => {
                Err(ModuleServiceError::NameConflict(name))
            }
            Err(error) => Err(self.unexpected("create_module", error)),
        }
    }

    /// Lists the project's modules as materialized views, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleServiceError::Unexpected`] on infrastructure faults.
    pub async fn list_modules(
        &self,
        context: &RequestContext,
        project_id: ProjectId,
    ) -> ModuleServiceResult<Vec<ModuleView>> {
        self.modules
            .list_views(context.workspace_id(), project_id)
            .await
            .map_err(|error| self.unexpected("list_modules", error))
    }

    /// Retrieves a single module as a materialized view.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleServiceError::ModuleNotFound`] when the module does
    /// not exist in the project, or [`ModuleServiceError::Unexpected`] on
    /// infrastructure faults.
    pub async fn get_module(
        &self,
        context: &RequestContext,
        project_id: ProjectId,
        module_id: ModuleId,
    ) -> ModuleServiceResult<ModuleView> {
        self.modules
            .find_view(context.workspace_id(), project_id, module_id)
            .await
            .map_err(|error| self.unexpected("get_module", error))?
            .ok_or(ModuleServiceError::ModuleNotFound(module_id))
    }

    /// Lists link views for issues currently in the module, newest first.
    ///
    /// An unknown module yields an empty list rather than an error. The
    /// optional filter narrows the result to a single issue.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleServiceError::Unexpected`] on infrastructure faults.
    pub async fn list_module_issues(
        &self,
        context: &RequestContext,
        project_id: ProjectId,
        module_id: ModuleId,
        issue_filter: Option<IssueId>,
    ) -> ModuleServiceResult<Vec<ModuleIssueView>> {
        self.links
            .list_views_for_module(context.workspace_id(), project_id, module_id, issue_filter)
            .await
            .map_err(|error| self.unexpected("list_module_issues", error))
    }

    /// Assigns the requested issues to the module and returns the module's
    /// current link views.
    ///
    /// Requested issues without a link are linked to the module; issues
    /// linked to a different module are moved. Repeated ids collapse to the
    /// first occurrence and issues already in the module are untouched.
    /// Exactly one activity event is published per invocation, including
    /// invocations that changed nothing; a failed publish is logged and
    /// never fails the assignment.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleServiceError::EmptyIssueList`] when no issue ids are
    /// given, [`ModuleServiceError::ModuleNotFound`] when the module does
    /// not exist in the project, or [`ModuleServiceError::Unexpected`] on
    /// infrastructure faults.
    pub async fn add_issues_to_module(
        &self,
        context: &RequestContext,
        project_id: ProjectId,
        module_id: ModuleId,
        issue_ids: &[IssueId],
    ) -> ModuleServiceResult<Vec<ModuleIssueView>> {
        if issue_ids.is_empty() {
            return Err(ModuleServiceError::EmptyIssueList);
        }

        let module = self
            .modules
            .find(context.workspace_id(), project_id, module_id)
            .await
            .map_err(|error| self.unexpected("add_issues_to_module", error))?
            .ok_or(ModuleServiceError::ModuleNotFound(module_id))?;

        let existing_links = self
            .links
            .find_links_by_issue_ids(context.workspace_id(), project_id, issue_ids)
            .await
            .map_err(|error| self.unexpected("add_issues_to_module", error))?;

        let plan = reconcile(module.id(), issue_ids, &existing_links);
        tracing::debug!(
            "Applying link plan for module {}: {} creates, {} moves",
            module.id(),
            plan.creates().len(),
            plan.moves().len(),
        );
        self.links
            .apply_plan(context, project_id, &plan, self.clock.utc())
            .await
            .map_err(|error| self.unexpected("add_issues_to_module", error))?;

        let event = IssueActivityEvent {
            workspace_id: context.workspace_id(),
            project_id,
            module_id: module.id(),
            actor_id: context.actor_id(),
            requested_issue_ids: issue_ids.to_vec(),
            created: plan.creates().to_vec(),
            moved: plan.activity().to_vec(),
        };
        if let Err(error) = self.activity.publish(event).await {
            tracing::warn!("Failed to publish module activity event: {error}");
        }

        self.links
            .list_views_for_module(context.workspace_id(), project_id, module.id(), None)
            .await
            .map_err(|error| self.unexpected("add_issues_to_module", error))
    }

    /// Reports a fault to the monitor and degrades it to the generic error.
    fn unexpected<E>(&self, operation: &'static str, error: E) -> ModuleServiceError
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.monitor.capture(operation, &error);
        ModuleServiceError::Unexpected(Arc::new(error))
    }
}
