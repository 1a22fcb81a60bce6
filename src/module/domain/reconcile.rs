//! Pure reconciliation of requested issue assignments against existing links.
//!
//! Bulk-assigning issues to a module must respect the invariant that an issue
//! belongs to at most one module. The reconciler compares the requested issue
//! ids with the links that already exist and produces a [`LinkPlan`]: links to
//! create, links to move, and the activity deltas describing each move. The
//! reconciler performs no I/O and never fails; empty input and unknown
//! modules are rejected by the service before it runs.

use super::{IssueId, LinkId, ModuleId, ModuleIssueLink};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Request to link an issue that belongs to no module yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLink {
    /// Issue to link.
    pub issue_id: IssueId,
    /// Module the issue is assigned to.
    pub module_id: ModuleId,
}

/// Request to move an existing link to a different module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMove {
    /// Link to update.
    pub link_id: LinkId,
    /// Module the link now points at.
    pub module_id: ModuleId,
}

/// Record of an issue moving between modules, reported to the activity
/// stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDelta {
    /// Issue that moved.
    pub issue_id: IssueId,
    /// Module the issue belonged to before the move.
    pub old_module_id: ModuleId,
    /// Module the issue belongs to after the move.
    pub new_module_id: ModuleId,
}

/// Outcome of reconciling requested assignments against existing links.
///
/// Each collection preserves the first-occurrence order of the requested
/// issue ids. An issue already linked to the target module appears in none
/// of them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkPlan {
    creates: Vec<NewLink>,
    moves: Vec<LinkMove>,
    activity: Vec<ActivityDelta>,
}

impl LinkPlan {
    /// Returns the links to create.
    #[must_use]
    pub fn creates(&self) -> &[NewLink] {
        &self.creates
    }

    /// Returns the links to move.
    #[must_use]
    pub fn moves(&self) -> &[LinkMove] {
        &self.moves
    }

    /// Returns the activity deltas for moved links.
    #[must_use]
    pub fn activity(&self) -> &[ActivityDelta] {
        &self.activity
    }

    /// Returns `true` when the plan requires no persistence changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty() && self.moves.is_empty()
    }
}

/// Reconciles requested issue assignments against the issues' existing links.
///
/// Requested ids are processed in input order with repeats collapsed to the
/// first occurrence. An issue with no existing link yields a create; an issue
/// linked to a different module yields a move plus an activity delta; an
/// issue already linked to `target_module_id` yields nothing. Links for
/// issues outside the requested set are ignored.
#[must_use]
pub fn reconcile(
    target_module_id: ModuleId,
    requested_issue_ids: &[IssueId],
    existing_links: &[ModuleIssueLink],
) -> LinkPlan {
    let mut links_by_issue: HashMap<IssueId, &ModuleIssueLink> =
        HashMap::with_capacity(existing_links.len());
    for link in existing_links {
        // At most one link per issue; keep the first if the input breaks
        // that invariant.
        links_by_issue.entry(link.issue_id()).or_insert(link);
    }

    let mut seen = HashSet::with_capacity(requested_issue_ids.len());
    let mut plan = LinkPlan::default();
    for issue_id in requested_issue_ids {
        if !seen.insert(*issue_id) {
            continue;
        }
        match links_by_issue.get(issue_id) {
            None => plan.creates.push(NewLink {
                issue_id: *issue_id,
                module_id: target_module_id,
            }),
            Some(link) if link.module_id() != target_module_id => {
                plan.moves.push(LinkMove {
                    link_id: link.id(),
                    module_id: target_module_id,
                });
                plan.activity.push(ActivityDelta {
                    issue_id: *issue_id,
                    old_module_id: link.module_id(),
                    new_module_id: target_module_id,
                });
            }
            Some(_) => {}
        }
    }

    plan
}
