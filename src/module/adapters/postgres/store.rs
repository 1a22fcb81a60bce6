//! `PostgreSQL` repository implementation for module and link storage.

use super::{
    models::{
        IssueRow, LabelRow, MemberRow, ModuleIssueRow, ModuleMemberRow, ModuleRow,
        NewModuleIssueRow, NewModuleMemberRow, NewModuleRow, StateRow, SubIssueCountRow,
        WebLinkRow,
    },
    schema::{
        issue_assignees, issue_labels, issues, labels, members, module_issues, module_members,
        module_web_links, modules, projects, states,
    },
};
use crate::module::{
    domain::{
        ActorId, IssueId, IssueSummary, LabelId, LabelSummary, LinkId, LinkPlan, MemberSummary,
        Module, ModuleId, ModuleIssueLink, ModuleIssueView, ModuleName, ModuleStatus, ModuleView,
        ModuleWebLink, PersistedLinkData, PersistedModuleData, ProjectId, RequestContext, StateId,
        StateSummary, WebLinkId, WorkspaceId,
    },
    ports::{
        LinkRepositoryError, LinkRepositoryResult, ModuleIssueRepository, ModuleRepository,
        ModuleRepositoryError, ModuleRepositoryResult,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{
    DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError, QueryResult,
};
use std::collections::HashMap;

/// `PostgreSQL` connection pool type used by module adapters.
pub type ModulePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed store implementing both module repository ports.
#[derive(Debug, Clone)]
pub struct PostgresModuleStore {
    pool: ModulePgPool,
}

impl PostgresModuleStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ModulePgPool) -> Self {
        Self { pool }
    }

    async fn run_module_blocking<F, T>(&self, f: F) -> ModuleRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ModuleRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ModuleRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ModuleRepositoryError::persistence)?
    }

    async fn run_link_blocking<F, T>(&self, f: F) -> LinkRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> LinkRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(LinkRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(LinkRepositoryError::persistence)?
    }
}

impl From<DieselError> for ModuleRepositoryError {
    fn from(error: DieselError) -> Self {
        Self::persistence(error)
    }
}

impl From<DieselError> for LinkRepositoryError {
    fn from(error: DieselError) -> Self {
        Self::persistence(error)
    }
}

#[async_trait]
impl ModuleRepository for PostgresModuleStore {
    async fn project_exists(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
    ) -> ModuleRepositoryResult<bool> {
        self.run_module_blocking(move |connection| {
            let found = projects::table
                .filter(projects::id.eq(project_id.into_inner()))
                .filter(projects::workspace_id.eq(workspace_id.into_inner()))
                .select(projects::id)
                .first::<uuid::Uuid>(connection)
                .optional()
                .map_err(ModuleRepositoryError::persistence)?;
            Ok(found.is_some())
        })
        .await
    }

    async fn insert(&self, module: &Module) -> ModuleRepositoryResult<ModuleView> {
        let workspace_id = module.workspace_id();
        let project_id = module.project_id();
        let module_id = module.id();
        let module_name = module.name().clone();
        let new_row = to_new_module_row(module);
        let member_rows = to_new_member_rows(module)?;

        self.run_module_blocking(move |connection| {
            connection.transaction::<_, ModuleRepositoryError, _>(|tx_conn| {
                // The unique index still enforces the name constraint in the
                // window between this check and the insert.
                let taken = module_name_taken(tx_conn, project_id, module_name.as_str())
                    .map_err(ModuleRepositoryError::persistence)?;
                if taken {
                    return Err(ModuleRepositoryError::NameConflict(module_name.clone()));
                }
                insert_module_rows(tx_conn, &new_row, &member_rows, &module_name)
            })?;

            let inserted = load_module_views(connection, workspace_id, project_id, Some(module_id))?
                .into_iter()
                .next();
            inserted.ok_or_else(|| {
                ModuleRepositoryError::persistence(std::io::Error::other(
                    "module view missing immediately after insert",
                ))
            })
        })
        .await
    }

    async fn find(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        module_id: ModuleId,
    ) -> ModuleRepositoryResult<Option<Module>> {
        self.run_module_blocking(move |connection| {
            let maybe_row = modules::table
                .filter(modules::id.eq(module_id.into_inner()))
                .filter(modules::workspace_id.eq(workspace_id.into_inner()))
                .filter(modules::project_id.eq(project_id.into_inner()))
                .select(ModuleRow::as_select())
                .first::<ModuleRow>(connection)
                .optional()
                .map_err(ModuleRepositoryError::persistence)?;
            let Some(found_row) = maybe_row else {
                return Ok(None);
            };
            let member_ids = load_member_ids(connection, module_id)
                .map_err(ModuleRepositoryError::persistence)?;
            row_to_module(found_row, member_ids).map(Some)
        })
        .await
    }

    async fn find_view(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        module_id: ModuleId,
    ) -> ModuleRepositoryResult<Option<ModuleView>> {
        self.run_module_blocking(move |connection| {
            let views = load_module_views(connection, workspace_id, project_id, Some(module_id))?;
            Ok(views.into_iter().next())
        })
        .await
    }

    async fn list_views(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
    ) -> ModuleRepositoryResult<Vec<ModuleView>> {
        self.run_module_blocking(move |connection| {
            load_module_views(connection, workspace_id, project_id, None)
        })
        .await
    }
}

#[async_trait]
impl ModuleIssueRepository for PostgresModuleStore {
    async fn find_links_by_issue_ids(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        issue_ids: &[IssueId],
    ) -> LinkRepositoryResult<Vec<ModuleIssueLink>> {
        let lookup: Vec<uuid::Uuid> = issue_ids
            .iter()
            .map(|issue_id| issue_id.into_inner())
            .collect();
        self.run_link_blocking(move |connection| {
            let rows: Vec<ModuleIssueRow> = module_issues::table
                .filter(module_issues::workspace_id.eq(workspace_id.into_inner()))
                .filter(module_issues::project_id.eq(project_id.into_inner()))
                .filter(module_issues::issue_id.eq_any(&lookup))
                .select(ModuleIssueRow::as_select())
                .load(connection)
                .map_err(LinkRepositoryError::persistence)?;
            Ok(rows.iter().map(row_to_link).collect())
        })
        .await
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
        let new_rows = to_new_link_rows(*context, project_id, plan, applied_at);
        let link_moves = plan.moves().to_vec();
        let actor_id = context.actor_id();

        self.run_link_blocking(move |connection| {
            connection.transaction::<_, LinkRepositoryError, _>(|tx_conn| {
                if !new_rows.is_empty() {
                    // An issue linked concurrently conflicts on the unique
                    // issue index and is skipped rather than duplicated.
                    diesel::insert_into(module_issues::table)
                        .values(&new_rows)
                        .on_conflict_do_nothing()
                        .execute(tx_conn)
                        .map_err(LinkRepositoryError::persistence)?;
                }
                for link_move in &link_moves {
                    diesel::update(
                        module_issues::table
                            .filter(module_issues::id.eq(link_move.link_id.into_inner())),
                    )
                    .set((
                        module_issues::module_id.eq(link_move.module_id.into_inner()),
                        module_issues::updated_by.eq(actor_id.into_inner()),
                        module_issues::updated_at.eq(applied_at),
                    ))
                    .execute(tx_conn)
                    .map_err(LinkRepositoryError::persistence)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn list_views_for_module(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        module_id: ModuleId,
        issue_filter: Option<IssueId>,
    ) -> LinkRepositoryResult<Vec<ModuleIssueView>> {
        self.run_link_blocking(move |connection| {
            let module_in_scope = module_exists(connection, workspace_id, project_id, module_id)
                .map_err(LinkRepositoryError::persistence)?;
            if !module_in_scope {
                return Ok(Vec::new());
            }
            let link_rows = load_link_rows(connection, module_id, issue_filter)
                .map_err(LinkRepositoryError::persistence)?;
            link_rows_to_views(connection, &link_rows).map_err(LinkRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_module_row(module: &Module) -> NewModuleRow {
    NewModuleRow {
        id: module.id().into_inner(),
        workspace_id: module.workspace_id().into_inner(),
        project_id: module.project_id().into_inner(),
        name: module.name().as_str().to_owned(),
        description: module.description().map(ToOwned::to_owned),
        status: module.status().as_str().to_owned(),
        lead_id: module.lead().map(ActorId::into_inner),
        start_date: module.start_date(),
        target_date: module.target_date(),
        created_by: module.created_by().into_inner(),
        updated_by: module.updated_by().into_inner(),
        created_at: module.created_at(),
        updated_at: module.updated_at(),
    }
}

fn to_new_member_rows(module: &Module) -> ModuleRepositoryResult<Vec<NewModuleMemberRow>> {
    module
        .members()
        .iter()
        .enumerate()
        .map(|(index, member_id)| {
            let position = i32::try_from(index).map_err(ModuleRepositoryError::persistence)?;
            Ok(NewModuleMemberRow {
                id: uuid::Uuid::new_v4(),
                module_id: module.id().into_inner(),
                member_id: member_id.into_inner(),
                position,
            })
        })
        .collect()
}

fn module_name_taken(
    connection: &mut PgConnection,
    project_id: ProjectId,
    name: &str,
) -> QueryResult<bool> {
    let existing: i64 = modules::table
        .filter(modules::project_id.eq(project_id.into_inner()))
        .filter(modules::name.eq(name))
        .count()
        .get_result(connection)?;
    Ok(existing > 0)
}

fn insert_module_rows(
    connection: &mut PgConnection,
    new_row: &NewModuleRow,
    member_rows: &[NewModuleMemberRow],
    module_name: &ModuleName,
) -> ModuleRepositoryResult<()> {
    diesel::insert_into(modules::table)
        .values(new_row)
        .execute(connection)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                if is_module_name_unique_violation(info.as_ref()) =>
            {
                ModuleRepositoryError::NameConflict(module_name.clone())
            }
            _ => ModuleRepositoryError::persistence(err),
        })?;

    if !member_rows.is_empty() {
        diesel::insert_into(module_members::table)
            .values(member_rows)
            .execute(connection)
            .map_err(ModuleRepositoryError::persistence)?;
    }
    Ok(())
}

fn is_module_name_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_modules_project_name_unique")
}

fn module_exists(
    connection: &mut PgConnection,
    workspace_id: WorkspaceId,
    project_id: ProjectId,
    module_id: ModuleId,
) -> QueryResult<bool> {
    let found = modules::table
        .filter(modules::id.eq(module_id.into_inner()))
        .filter(modules::workspace_id.eq(workspace_id.into_inner()))
        .filter(modules::project_id.eq(project_id.into_inner()))
        .select(modules::id)
        .first::<uuid::Uuid>(connection)
        .optional()?;
    Ok(found.is_some())
}

fn load_member_ids(
    connection: &mut PgConnection,
    module_id: ModuleId,
) -> QueryResult<Vec<uuid::Uuid>> {
    module_members::table
        .filter(module_members::module_id.eq(module_id.into_inner()))
        .order(module_members::position.asc())
        .select(module_members::member_id)
        .load(connection)
}

fn load_module_rows(
    connection: &mut PgConnection,
    workspace_id: WorkspaceId,
    project_id: ProjectId,
    module_filter: Option<ModuleId>,
) -> QueryResult<Vec<ModuleRow>> {
    let mut query = modules::table
        .filter(modules::workspace_id.eq(workspace_id.into_inner()))
        .filter(modules::project_id.eq(project_id.into_inner()))
        .select(ModuleRow::as_select())
        .into_boxed();
    if let Some(filter_module) = module_filter {
        query = query.filter(modules::id.eq(filter_module.into_inner()));
    }
    query
        .order((modules::created_at.desc(), modules::id.desc()))
        .load(connection)
}

fn load_module_views(
    connection: &mut PgConnection,
    workspace_id: WorkspaceId,
    project_id: ProjectId,
    module_filter: Option<ModuleId>,
) -> ModuleRepositoryResult<Vec<ModuleView>> {
    let module_rows = load_module_rows(connection, workspace_id, project_id, module_filter)
        .map_err(ModuleRepositoryError::persistence)?;
    if module_rows.is_empty() {
        return Ok(Vec::new());
    }
    let mut sources =
        load_view_sources(connection, &module_rows).map_err(ModuleRepositoryError::persistence)?;
    module_rows
        .into_iter()
        .map(|module_row| assemble_module_view(module_row, &mut sources))
        .collect()
}

/// Related rows for a batch of modules, bucketed for view assembly.
struct ViewSources {
    assignments_by_module: HashMap<uuid::Uuid, Vec<uuid::Uuid>>,
    member_summaries: HashMap<uuid::Uuid, MemberSummary>,
    web_links_by_module: HashMap<uuid::Uuid, Vec<ModuleWebLink>>,
    link_rows_by_module: HashMap<uuid::Uuid, Vec<ModuleIssueRow>>,
    issue_summaries: HashMap<uuid::Uuid, IssueSummary>,
}

fn load_view_sources(
    connection: &mut PgConnection,
    module_rows: &[ModuleRow],
) -> QueryResult<ViewSources> {
    let module_ids: Vec<uuid::Uuid> = module_rows.iter().map(|row| row.id).collect();

    let assignment_rows: Vec<ModuleMemberRow> = module_members::table
        .filter(module_members::module_id.eq_any(&module_ids))
        .order(module_members::position.asc())
        .select(ModuleMemberRow::as_select())
        .load(connection)?;
    let mut assignments_by_module: HashMap<uuid::Uuid, Vec<uuid::Uuid>> = HashMap::new();
    for assignment in &assignment_rows {
        assignments_by_module
            .entry(assignment.module_id)
            .or_default()
            .push(assignment.member_id);
    }

    let mut member_lookup: Vec<uuid::Uuid> =
        assignment_rows.iter().map(|row| row.member_id).collect();
    member_lookup.extend(module_rows.iter().filter_map(|row| row.lead_id));
    member_lookup.sort_unstable();
    member_lookup.dedup();
    let member_summaries = load_member_summaries(connection, &member_lookup)?;

    let web_link_rows: Vec<WebLinkRow> = module_web_links::table
        .filter(module_web_links::module_id.eq_any(&module_ids))
        .order(module_web_links::title.asc())
        .select(WebLinkRow::as_select())
        .load(connection)?;
    let mut web_links_by_module: HashMap<uuid::Uuid, Vec<ModuleWebLink>> = HashMap::new();
    for web_link_row in web_link_rows {
        web_links_by_module
            .entry(web_link_row.module_id)
            .or_default()
            .push(web_link_from_row(web_link_row));
    }

    let link_rows: Vec<ModuleIssueRow> = module_issues::table
        .filter(module_issues::module_id.eq_any(&module_ids))
        .order((module_issues::created_at.desc(), module_issues::id.desc()))
        .select(ModuleIssueRow::as_select())
        .load(connection)?;
    let mut issue_lookup: Vec<uuid::Uuid> = link_rows.iter().map(|row| row.issue_id).collect();
    issue_lookup.sort_unstable();
    issue_lookup.dedup();
    let issue_summaries = load_issue_summaries(connection, &issue_lookup)?;
    let mut link_rows_by_module: HashMap<uuid::Uuid, Vec<ModuleIssueRow>> = HashMap::new();
    for link_row in link_rows {
        link_rows_by_module
            .entry(link_row.module_id)
            .or_default()
            .push(link_row);
    }

    Ok(ViewSources {
        assignments_by_module,
        member_summaries,
        web_links_by_module,
        link_rows_by_module,
        issue_summaries,
    })
}

fn assemble_module_view(
    module_row: ModuleRow,
    sources: &mut ViewSources,
) -> ModuleRepositoryResult<ModuleView> {
    let module_uuid = module_row.id;
    let lead = module_row
        .lead_id
        .and_then(|lead_id| sources.member_summaries.get(&lead_id).cloned());
    let assigned_ids = sources
        .assignments_by_module
        .remove(&module_uuid)
        .unwrap_or_default();
    let member_views = assigned_ids
        .iter()
        .filter_map(|member_id| sources.member_summaries.get(member_id).cloned())
        .collect();
    let web_links = sources
        .web_links_by_module
        .remove(&module_uuid)
        .unwrap_or_default();
    let module_link_rows = sources
        .link_rows_by_module
        .remove(&module_uuid)
        .unwrap_or_default();
    let issue_links = links_to_views(&module_link_rows, &sources.issue_summaries);
    let module = row_to_module(module_row, assigned_ids)?;
    Ok(ModuleView {
        module,
        lead,
        members: member_views,
        web_links,
        issue_links,
    })
}

fn load_link_rows(
    connection: &mut PgConnection,
    module_id: ModuleId,
    issue_filter: Option<IssueId>,
) -> QueryResult<Vec<ModuleIssueRow>> {
    let mut query = module_issues::table
        .filter(module_issues::module_id.eq(module_id.into_inner()))
        .select(ModuleIssueRow::as_select())
        .into_boxed();
    if let Some(filter_issue) = issue_filter {
        query = query.filter(module_issues::issue_id.eq(filter_issue.into_inner()));
    }
    query
        .order((module_issues::created_at.desc(), module_issues::id.desc()))
        .load(connection)
}

fn link_rows_to_views(
    connection: &mut PgConnection,
    link_rows: &[ModuleIssueRow],
) -> QueryResult<Vec<ModuleIssueView>> {
    let mut issue_lookup: Vec<uuid::Uuid> = link_rows.iter().map(|row| row.issue_id).collect();
    issue_lookup.sort_unstable();
    issue_lookup.dedup();
    let issue_summaries = load_issue_summaries(connection, &issue_lookup)?;
    Ok(links_to_views(link_rows, &issue_summaries))
}

fn links_to_views(
    link_rows: &[ModuleIssueRow],
    issue_summaries: &HashMap<uuid::Uuid, IssueSummary>,
) -> Vec<ModuleIssueView> {
    link_rows
        .iter()
        .filter_map(|link_row| {
            let issue = issue_summaries.get(&link_row.issue_id).cloned()?;
            Some(ModuleIssueView {
                link: row_to_link(link_row),
                issue,
            })
        })
        .collect()
}

fn load_member_summaries(
    connection: &mut PgConnection,
    member_ids: &[uuid::Uuid],
) -> QueryResult<HashMap<uuid::Uuid, MemberSummary>> {
    if member_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<MemberRow> = members::table
        .filter(members::id.eq_any(member_ids))
        .select(MemberRow::as_select())
        .load(connection)?;
    Ok(rows
        .into_iter()
        .map(|member_row| (member_row.id, member_from_row(member_row)))
        .collect())
}

fn load_issue_summaries(
    connection: &mut PgConnection,
    issue_ids: &[uuid::Uuid],
) -> QueryResult<HashMap<uuid::Uuid, IssueSummary>> {
    if issue_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let issue_rows: Vec<IssueRow> = issues::table
        .filter(issues::id.eq_any(issue_ids))
        .select(IssueRow::as_select())
        .load(connection)?;

    let mut state_lookup: Vec<uuid::Uuid> =
        issue_rows.iter().filter_map(|row| row.state_id).collect();
    state_lookup.sort_unstable();
    state_lookup.dedup();
    let state_rows: Vec<StateRow> = states::table
        .filter(states::id.eq_any(&state_lookup))
        .select(StateRow::as_select())
        .load(connection)?;
    let states_by_id: HashMap<uuid::Uuid, StateSummary> = state_rows
        .into_iter()
        .map(|state_row| (state_row.id, state_from_row(state_row)))
        .collect();

    let label_rows: Vec<(uuid::Uuid, LabelRow)> = issue_labels::table
        .inner_join(labels::table)
        .filter(issue_labels::issue_id.eq_any(issue_ids))
        .order(labels::name.asc())
        .select((issue_labels::issue_id, LabelRow::as_select()))
        .load(connection)?;
    let mut labels_by_issue: HashMap<uuid::Uuid, Vec<LabelSummary>> = HashMap::new();
    for (labelled_issue, label_row) in label_rows {
        labels_by_issue
            .entry(labelled_issue)
            .or_default()
            .push(label_from_row(label_row));
    }

    let assignee_rows: Vec<(uuid::Uuid, MemberRow)> = issue_assignees::table
        .inner_join(members::table)
        .filter(issue_assignees::issue_id.eq_any(issue_ids))
        .order(members::display_name.asc())
        .select((issue_assignees::issue_id, MemberRow::as_select()))
        .load(connection)?;
    let mut assignees_by_issue: HashMap<uuid::Uuid, Vec<MemberSummary>> = HashMap::new();
    for (assigned_issue, member_row) in assignee_rows {
        assignees_by_issue
            .entry(assigned_issue)
            .or_default()
            .push(member_from_row(member_row));
    }

    let sub_issue_counts = count_sub_issues(connection, issue_ids)?;

    let mut summaries = HashMap::with_capacity(issue_rows.len());
    for issue_row in issue_rows {
        let issue_uuid = issue_row.id;
        let state = issue_row
            .state_id
            .and_then(|state_id| states_by_id.get(&state_id).cloned());
        summaries.insert(
            issue_uuid,
            IssueSummary {
                id: IssueId::from_uuid(issue_uuid),
                name: issue_row.name,
                sequence_id: require_u64(issue_row.sequence_id)?,
                state,
                labels: labels_by_issue.remove(&issue_uuid).unwrap_or_default(),
                assignees: assignees_by_issue.remove(&issue_uuid).unwrap_or_default(),
                sub_issues_count: sub_issue_counts
                    .get(&issue_uuid)
                    .copied()
                    .unwrap_or_default(),
            },
        );
    }
    Ok(summaries)
}

fn count_sub_issues(
    connection: &mut PgConnection,
    parent_ids: &[uuid::Uuid],
) -> QueryResult<HashMap<uuid::Uuid, u64>> {
    if parent_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<SubIssueCountRow> = diesel::sql_query(concat!(
        "SELECT parent_id, COUNT(id) AS sub_issues FROM issues ",
        "WHERE parent_id = ANY($1) GROUP BY parent_id",
    ))
    .bind::<diesel::sql_types::Array<diesel::sql_types::Uuid>, _>(parent_ids.to_vec())
    .load(connection)?;
    rows.into_iter()
        .map(|count_row| Ok((count_row.parent_id, require_u64(count_row.sub_issues)?)))
        .collect()
}

fn require_u64(value: i64) -> QueryResult<u64> {
    u64::try_from(value).map_err(|err| DieselError::DeserializationError(Box::new(err)))
}

fn to_new_link_rows(
    context: RequestContext,
    project_id: ProjectId,
    plan: &LinkPlan,
    applied_at: DateTime<Utc>,
) -> Vec<NewModuleIssueRow> {
    plan.creates()
        .iter()
        .map(|create| {
            let link = ModuleIssueLink::new(
                create.module_id,
                create.issue_id,
                project_id,
                context.workspace_id(),
                context.actor_id(),
                applied_at,
            );
            link_to_new_row(&link)
        })
        .collect()
}

fn link_to_new_row(link: &ModuleIssueLink) -> NewModuleIssueRow {
    NewModuleIssueRow {
        id: link.id().into_inner(),
        workspace_id: link.workspace_id().into_inner(),
        project_id: link.project_id().into_inner(),
        module_id: link.module_id().into_inner(),
        issue_id: link.issue_id().into_inner(),
        created_by: link.created_by().into_inner(),
        updated_by: link.updated_by().into_inner(),
        created_at: link.created_at(),
        updated_at: link.updated_at(),
    }
}

fn row_to_link(row: &ModuleIssueRow) -> ModuleIssueLink {
    ModuleIssueLink::from_persisted(PersistedLinkData {
        id: LinkId::from_uuid(row.id),
        workspace_id: WorkspaceId::from_uuid(row.workspace_id),
        project_id: ProjectId::from_uuid(row.project_id),
        module_id: ModuleId::from_uuid(row.module_id),
        issue_id: IssueId::from_uuid(row.issue_id),
        created_by: ActorId::from_uuid(row.created_by),
        updated_by: ActorId::from_uuid(row.updated_by),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_module(row: ModuleRow, member_ids: Vec<uuid::Uuid>) -> ModuleRepositoryResult<Module> {
    let ModuleRow {
        id,
        workspace_id,
        project_id,
        name: persisted_name,
        description,
        status: persisted_status,
        lead_id,
        start_date,
        target_date,
        created_by,
        updated_by,
        created_at,
        updated_at,
    } = row;

    let name = ModuleName::new(persisted_name).map_err(ModuleRepositoryError::persistence)?;
    let status = ModuleStatus::try_from(persisted_status.as_str())
        .map_err(ModuleRepositoryError::persistence)?;

    let data = PersistedModuleData {
        id: ModuleId::from_uuid(id),
        workspace_id: WorkspaceId::from_uuid(workspace_id),
        project_id: ProjectId::from_uuid(project_id),
        name,
        description,
        status,
        lead: lead_id.map(ActorId::from_uuid),
        members: member_ids.into_iter().map(ActorId::from_uuid).collect(),
        start_date,
        target_date,
        created_by: ActorId::from_uuid(created_by),
        updated_by: ActorId::from_uuid(updated_by),
        created_at,
        updated_at,
    };
    Ok(Module::from_persisted(data))
}

fn member_from_row(row: MemberRow) -> MemberSummary {
    MemberSummary {
        id: ActorId::from_uuid(row.id),
        display_name: row.display_name,
        avatar_url: row.avatar_url,
    }
}

fn state_from_row(row: StateRow) -> StateSummary {
    StateSummary {
        id: StateId::from_uuid(row.id),
        name: row.name,
        group: row.state_group,
        color: row.color,
    }
}

fn label_from_row(row: LabelRow) -> LabelSummary {
    LabelSummary {
        id: LabelId::from_uuid(row.id),
        name: row.name,
        color: row.color,
    }
}

fn web_link_from_row(row: WebLinkRow) -> ModuleWebLink {
    ModuleWebLink {
        id: WebLinkId::from_uuid(row.id),
        module_id: ModuleId::from_uuid(row.module_id),
        title: row.title,
        url: row.url,
    }
}
