//! Materialized read models returned by module repositories.

use super::{ActorId, IssueId, LabelId, Module, ModuleIssueLink, ModuleWebLink, StateId};
use serde::{Deserialize, Serialize};

/// Workspace member summary surfaced in module views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSummary {
    /// Member identifier.
    pub id: ActorId,
    /// Member display name.
    pub display_name: String,
    /// Member avatar URL, if any.
    pub avatar_url: Option<String>,
}

/// Workflow state summary surfaced with linked issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSummary {
    /// State identifier.
    pub id: StateId,
    /// State display name.
    pub name: String,
    /// Workflow group the state belongs to.
    pub group: String,
    /// Display colour.
    pub color: String,
}

/// Issue label summary surfaced with linked issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSummary {
    /// Label identifier.
    pub id: LabelId,
    /// Label display name.
    pub name: String,
    /// Display colour.
    pub color: String,
}

/// Issue summary surfaced with module-issue links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    /// Issue identifier.
    pub id: IssueId,
    /// Issue display name.
    pub name: String,
    /// Per-project sequence number.
    pub sequence_id: u64,
    /// Workflow state summary, if the issue has one.
    pub state: Option<StateSummary>,
    /// Labels attached to the issue.
    pub labels: Vec<LabelSummary>,
    /// Members the issue is assigned to.
    pub assignees: Vec<MemberSummary>,
    /// Number of direct sub-issues.
    pub sub_issues_count: u64,
}

/// Module-issue link together with the linked issue's summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleIssueView {
    /// The link record.
    pub link: ModuleIssueLink,
    /// Summary of the linked issue.
    pub issue: IssueSummary,
}

/// Module aggregate together with its related summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleView {
    /// The module aggregate.
    pub module: Module,
    /// Summary of the module lead, if one is assigned and known.
    pub lead: Option<MemberSummary>,
    /// Summaries of known assigned members, in assignment order.
    pub members: Vec<MemberSummary>,
    /// Web links attached to the module.
    pub web_links: Vec<ModuleWebLink>,
    /// Links for issues currently in the module, with issue summaries.
    pub issue_links: Vec<ModuleIssueView>,
}
