//! Diesel row models for module persistence.

use super::schema::{
    issues, labels, members, module_issues, module_members, module_web_links, modules, states,
};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for module records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = modules)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ModuleRow {
    /// Module identifier.
    pub id: uuid::Uuid,
    /// Workspace the module belongs to.
    pub workspace_id: uuid::Uuid,
    /// Project the module belongs to.
    pub project_id: uuid::Uuid,
    /// Module display name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Lifecycle status in canonical storage format.
    pub status: String,
    /// Optional module lead.
    pub lead_id: Option<uuid::Uuid>,
    /// Optional scheduled start date.
    pub start_date: Option<NaiveDate>,
    /// Optional expected completion date.
    pub target_date: Option<NaiveDate>,
    /// Member that created the module.
    pub created_by: uuid::Uuid,
    /// Member that last updated the module.
    pub updated_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for module records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = modules)]
pub struct NewModuleRow {
    /// Module identifier.
    pub id: uuid::Uuid,
    /// Workspace the module belongs to.
    pub workspace_id: uuid::Uuid,
    /// Project the module belongs to.
    pub project_id: uuid::Uuid,
    /// Module display name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Lifecycle status in canonical storage format.
    pub status: String,
    /// Optional module lead.
    pub lead_id: Option<uuid::Uuid>,
    /// Optional scheduled start date.
    pub start_date: Option<NaiveDate>,
    /// Optional expected completion date.
    pub target_date: Option<NaiveDate>,
    /// Member that created the module.
    pub created_by: uuid::Uuid,
    /// Member that last updated the module.
    pub updated_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for module member assignments.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = module_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ModuleMemberRow {
    /// Assignment identifier.
    pub id: uuid::Uuid,
    /// Module the member is assigned to.
    pub module_id: uuid::Uuid,
    /// Assigned member.
    pub member_id: uuid::Uuid,
    /// Assignment order within the module.
    pub position: i32,
}

/// Insert model for module member assignments.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = module_members)]
pub struct NewModuleMemberRow {
    /// Assignment identifier.
    pub id: uuid::Uuid,
    /// Module the member is assigned to.
    pub module_id: uuid::Uuid,
    /// Assigned member.
    pub member_id: uuid::Uuid,
    /// Assignment order within the module.
    pub position: i32,
}

/// Query result row for workspace members.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MemberRow {
    /// Member identifier.
    pub id: uuid::Uuid,
    /// Member display name.
    pub display_name: String,
    /// Optional avatar URL.
    pub avatar_url: Option<String>,
}

/// Query result row for workflow states.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = states)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StateRow {
    /// State identifier.
    pub id: uuid::Uuid,
    /// State display name.
    pub name: String,
    /// Workflow group the state belongs to.
    pub state_group: String,
    /// Display colour.
    pub color: String,
}

/// Query result row for issue labels.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = labels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LabelRow {
    /// Label identifier.
    pub id: uuid::Uuid,
    /// Label display name.
    pub name: String,
    /// Display colour.
    pub color: String,
}

/// Query result row for issues, narrowed to summary fields.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = issues)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IssueRow {
    /// Issue identifier.
    pub id: uuid::Uuid,
    /// Issue display name.
    pub name: String,
    /// Per-project sequence number.
    pub sequence_id: i64,
    /// Optional workflow state.
    pub state_id: Option<uuid::Uuid>,
}

/// Query result row for module web links.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = module_web_links)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WebLinkRow {
    /// Web link identifier.
    pub id: uuid::Uuid,
    /// Module the link is attached to.
    pub module_id: uuid::Uuid,
    /// Human-readable link title.
    pub title: String,
    /// Link destination URL.
    pub url: String,
}

/// Query result row for module-issue links.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = module_issues)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ModuleIssueRow {
    /// Link identifier.
    pub id: uuid::Uuid,
    /// Workspace the link belongs to.
    pub workspace_id: uuid::Uuid,
    /// Project the link belongs to.
    pub project_id: uuid::Uuid,
    /// Module the issue currently belongs to.
    pub module_id: uuid::Uuid,
    /// Linked issue.
    pub issue_id: uuid::Uuid,
    /// Member that created the link.
    pub created_by: uuid::Uuid,
    /// Member that last moved the link.
    pub updated_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for module-issue links.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = module_issues)]
pub struct NewModuleIssueRow {
    /// Link identifier.
    pub id: uuid::Uuid,
    /// Workspace the link belongs to.
    pub workspace_id: uuid::Uuid,
    /// Project the link belongs to.
    pub project_id: uuid::Uuid,
    /// Module the issue is assigned to.
    pub module_id: uuid::Uuid,
    /// Linked issue.
    pub issue_id: uuid::Uuid,
    /// Member that created the link.
    pub created_by: uuid::Uuid,
    /// Member that last moved the link.
    pub updated_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Aggregated sub-issue count per parent issue from a raw grouped query.
#[derive(Debug, Clone, QueryableByName)]
pub struct SubIssueCountRow {
    /// Parent issue identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub parent_id: uuid::Uuid,
    /// Number of direct sub-issues.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub sub_issues: i64,
}
