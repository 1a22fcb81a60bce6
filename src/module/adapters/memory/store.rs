//! In-memory module store for service and flow tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::module::{
    domain::{
        ActorId, IssueId, IssueSummary, LabelId, LabelSummary, LinkId, LinkPlan, MemberSummary,
        Module, ModuleId, ModuleIssueLink, ModuleIssueView, ModuleView, ModuleWebLink, ProjectId,
        RequestContext, StateId, StateSummary, WorkspaceId,
    },
    ports::{
        LinkRepositoryError, LinkRepositoryResult, ModuleIssueRepository, ModuleRepository,
        ModuleRepositoryError, ModuleRepositoryResult,
    },
};

/// Issue fixture registered with the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueSeed {
    id: IssueId,
    name: String,
    sequence_id: u64,
    state: Option<StateId>,
    labels: Vec<LabelId>,
    assignees: Vec<ActorId>,
    parent: Option<IssueId>,
}

impl IssueSeed {
    /// Creates an issue fixture with required fields.
    #[must_use]
    pub fn new(id: IssueId, name: impl Into<String>, sequence_id: u64) -> Self {
        Self {
            id,
            name: name.into(),
            sequence_id,
            state: None,
            labels: Vec::new(),
            assignees: Vec::new(),
            parent: None,
        }
    }

    /// Sets the issue's workflow state.
    #[must_use]
    pub const fn with_state(mut self, state: StateId) -> Self {
        self.state = Some(state);
        self
    }

    /// Sets the issue's labels.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = LabelId>) -> Self {
        self.labels = labels.into_iter().collect();
        self
    }

    /// Sets the issue's assignees.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = ActorId>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    /// Marks the issue as a sub-issue of the given parent.
    #[must_use]
    pub const fn with_parent(mut self, parent: IssueId) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Thread-safe in-memory implementation of both module repositories.
#[derive(Debug, Clone, Default)]
pub struct InMemoryModuleStore {
    state: Arc<RwLock<InMemoryModuleState>>,
}

#[derive(Debug, Default)]
struct InMemoryModuleState {
    projects: HashMap<ProjectId, WorkspaceId>,
    members: HashMap<ActorId, MemberSummary>,
    states: HashMap<StateId, StateSummary>,
    labels: HashMap<LabelId, LabelSummary>,
    issues: HashMap<IssueId, IssueSeed>,
    modules: HashMap<ModuleId, Module>,
    web_links: HashMap<ModuleId, Vec<ModuleWebLink>>,
    links: HashMap<LinkId, ModuleIssueLink>,
    link_by_issue: HashMap<IssueId, LinkId>,
}

impl InMemoryModuleStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a project in a workspace.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the store lock is poisoned.
    pub fn seed_project(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
    ) -> ModuleRepositoryResult<()> {
        let mut state = self.write().map_err(ModuleRepositoryError::persistence)?;
        state.projects.insert(project_id, workspace_id);
        Ok(())
    }

    /// Registers a workspace member available for summaries.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the store lock is poisoned.
    pub fn seed_member(&self, member: MemberSummary) -> ModuleRepositoryResult<()> {
        let mut state = self.write().map_err(ModuleRepositoryError::persistence)?;
        state.members.insert(member.id, member);
        Ok(())
    }

    /// Registers a workflow state available for issue summaries.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the store lock is poisoned.
    pub fn seed_state(&self, summary: StateSummary) -> ModuleRepositoryResult<()> {
        let mut state = self.write().map_err(ModuleRepositoryError::persistence)?;
        state.states.insert(summary.id, summary);
        Ok(())
    }

    /// Registers an issue label available for issue summaries.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the store lock is poisoned.
    pub fn seed_label(&self, label: LabelSummary) -> ModuleRepositoryResult<()> {
        let mut state = self.write().map_err(ModuleRepositoryError::persistence)?;
        state.labels.insert(label.id, label);
        Ok(())
    }

    /// Registers an issue available for linking and summaries.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the store lock is poisoned.
    pub fn seed_issue(&self, issue: IssueSeed) -> ModuleRepositoryResult<()> {
        let mut state = self.write().map_err(ModuleRepositoryError::persistence)?;
        state.issues.insert(issue.id, issue);
        Ok(())
    }

    /// Attaches a web link to a module.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the store lock is poisoned.
    pub fn seed_web_link(&self, web_link: ModuleWebLink) -> ModuleRepositoryResult<()> {
        let mut state = self.write().map_err(ModuleRepositoryError::persistence)?;
        state
            .web_links
            .entry(web_link.module_id)
            .or_default()
            .push(web_link);
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, InMemoryModuleState>, std::io::Error> {
        self.state
            .read()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, InMemoryModuleState>, std::io::Error> {
        self.state
            .write()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }
}

/// Counts direct sub-issues per parent issue.
fn sub_issue_counts(state: &InMemoryModuleState) -> HashMap<IssueId, u64> {
    let mut counts = HashMap::new();
    for issue in state.issues.values() {
        if let Some(parent) = issue.parent {
            *counts.entry(parent).or_insert(0) += 1;
        }
    }
    counts
}

/// Builds an issue summary from seeded fixtures.
///
/// Returns `None` when the issue is not seeded, mirroring the join the
/// database adapter performs.
fn issue_summary(
    state: &InMemoryModuleState,
    issue_id: IssueId,
    counts: &HashMap<IssueId, u64>,
) -> Option<IssueSummary> {
    let seeded = state.issues.get(&issue_id)?;
    Some(IssueSummary {
        id: issue_id,
        name: seeded.name.clone(),
        sequence_id: seeded.sequence_id,
        state: seeded
            .state
            .and_then(|state_id| state.states.get(&state_id).cloned()),
        labels: seeded
            .labels
            .iter()
            .filter_map(|label_id| state.labels.get(label_id).cloned())
            .collect(),
        assignees: seeded
            .assignees
            .iter()
            .filter_map(|actor_id| state.members.get(actor_id).cloned())
            .collect(),
        sub_issues_count: counts.get(&issue_id).copied().unwrap_or(0),
    })
}

/// Builds link views for a module, newest first.
fn link_views(
    state: &InMemoryModuleState,
    module_id: ModuleId,
    issue_filter: Option<IssueId>,
) -> Vec<ModuleIssueView> {
    let counts = sub_issue_counts(state);
    let mut views: Vec<ModuleIssueView> = state
        .links
        .values()
        .filter(|link| link.module_id() == module_id)
        .filter(|link| issue_filter.is_none_or(|wanted| link.issue_id() == wanted))
        .filter_map(|link| {
            issue_summary(state, link.issue_id(), &counts).map(|issue| ModuleIssueView {
                link: link.clone(),
                issue,
            })
        })
        .collect();
    views.sort_by(|a, b| {
        b.link
            .created_at()
            .cmp(&a.link.created_at())
            .then_with(|| b.link.id().into_inner().cmp(&a.link.id().into_inner()))
    });
    views
}

/// Builds the materialized view for a module.
fn module_view(state: &InMemoryModuleState, module: &Module) -> ModuleView {
    ModuleView {
        module: module.clone(),
        lead: module
            .lead()
            .and_then(|actor_id| state.members.get(&actor_id).cloned()),
        members: module
            .members()
            .iter()
            .filter_map(|actor_id| state.members.get(actor_id).cloned())
            .collect(),
        web_links: state
            .web_links
            .get(&module.id())
            .cloned()
            .unwrap_or_default(),
        issue_links: link_views(state, module.id(), None),
    }
}

/// Reports whether the module belongs to the given workspace and project.
fn in_scope(module: &Module, workspace_id: WorkspaceId, project_id: ProjectId) -> bool {
    module.workspace_id() == workspace_id && module.project_id() == project_id
}

#[async_trait]
impl ModuleRepository for InMemoryModuleStore {
    async fn project_exists(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
    ) -> ModuleRepositoryResult<bool> {
        let state = self.read().map_err(ModuleRepositoryError::persistence)?;
        Ok(state.projects.get(&project_id) == Some(&workspace_id))
    }

    async fn insert(&self, module: &Module) -> ModuleRepositoryResult<ModuleView> {
        let mut state = self.write().map_err(ModuleRepositoryError::persistence)?;
        let name_taken = state.modules.values().any(|existing| {
            existing.project_id() == module.project_id()
                && existing.name().as_str() == module.name().as_str()
        });
        if name_taken {
            return Err(ModuleRepositoryError::NameConflict(module.name().clone()));
        }

        state.modules.insert(module.id(), module.clone());
        Ok(module_view(&state, module))
    }

    async fn find(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        module_id: ModuleId,
    ) -> ModuleRepositoryResult<Option<Module>> {
        let state = self.read().map_err(ModuleRepositoryError::persistence)?;
        Ok(state
            .modules
            .get(&module_id)
            .filter(|module| in_scope(module, workspace_id, project_id))
            .cloned())
    }

    async fn find_view(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        module_id: ModuleId,
    ) -> ModuleRepositoryResult<Option<ModuleView>> {
        let state = self.read().map_err(ModuleRepositoryError::persistence)?;
        Ok(state
            .modules
            .get(&module_id)
            .filter(|module| in_scope(module, workspace_id, project_id))
            .map(|module| module_view(&state, module)))
    }

    async fn list_views(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
    ) -> ModuleRepositoryResult<Vec<ModuleView>> {
        let state = self.read().map_err(ModuleRepositoryError::persistence)?;
        let mut modules: Vec<&Module> = state
            .modules
            .values()
            .filter(|module| in_scope(module, workspace_id, project_id))
            .collect();
        modules.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().into_inner().cmp(&a.id().into_inner()))
        });
        Ok(modules
            .into_iter()
            .map(|module| module_view(&state, module))
            .collect())
    }
}

#[async_trait]
impl ModuleIssueRepository for InMemoryModuleStore {
    async fn find_links_by_issue_ids(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        issue_ids: &[IssueId],
    ) -> LinkRepositoryResult<Vec<ModuleIssueLink>> {
        let state = self.read().map_err(LinkRepositoryError::persistence)?;
        let mut seen = HashSet::with_capacity(issue_ids.len());
        let mut found = Vec::new();
        for issue_id in issue_ids {
            if !seen.insert(*issue_id) {
                continue;
            }
            if let Some(link_id) = state.link_by_issue.get(issue_id)
                && let Some(link) = state.links.get(link_id)
                && link.workspace_id() == workspace_id
                && link.project_id() == project_id
            {
                found.push(link.clone());
            }
        }
        Ok(found)
    }

    async fn apply_plan(
        &self,
        context: &RequestContext,
        project_id: ProjectId,
        plan: &LinkPlan,
        applied_at: DateTime<Utc>,
    ) -> LinkRepositoryResult<()> {
        if plan.is_empty() {
            return Ok(());
        }
        let mut state = self.write().map_err(LinkRepositoryError::persistence)?;
        for create in plan.creates() {
            if state.link_by_issue.contains_key(&create.issue_id) {
                continue;
            }
            let link = ModuleIssueLink::new(
                create.module_id,
                create.issue_id,
                project_id,
                context.workspace_id(),
                context.actor_id(),
                applied_at,
            );
            state.link_by_issue.insert(create.issue_id, link.id());
            state.links.insert(link.id(), link);
        }
        for link_move in plan.moves() {
            if let Some(link) = state.links.get_mut(&link_move.link_id) {
                link.reassign(link_move.module_id, context.actor_id(), applied_at);
            }
        }
        Ok(())
    }

    async fn list_views_for_module(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        module_id: ModuleId,
        issue_filter: Option<IssueId>,
    ) -> LinkRepositoryResult<Vec<ModuleIssueView>> {
        let state = self.read().map_err(LinkRepositoryError::persistence)?;
        let scoped = state
            .modules
            .get(&module_id)
            .is_some_and(|module| in_scope(module, workspace_id, project_id));
        if !scoped {
            return Ok(Vec::new());
        }
        Ok(link_views(&state, module_id, issue_filter))
    }
}
