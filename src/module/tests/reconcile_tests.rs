//! Tests for the link reconciliation planner.

use crate::module::domain::{
    ActivityDelta, ActorId, IssueId, LinkMove, ModuleId, ModuleIssueLink, NewLink, ProjectId,
    WorkspaceId, reconcile,
};
use chrono::Utc;
use rstest::rstest;

fn link_for(module_id: ModuleId, issue_id: IssueId) -> ModuleIssueLink {
    ModuleIssueLink::new(
        module_id,
        issue_id,
        ProjectId::new(),
        WorkspaceId::new(),
        ActorId::new(),
        Utc::now(),
    )
}

#[rstest]
fn links_unlinked_issues_and_moves_linked_ones() {
    let source_module = ModuleId::new();
    let target_module = ModuleId::new();
    let issue_a = IssueId::new();
    let issue_b = IssueId::new();
    let issue_c = IssueId::new();
    let link_a = link_for(source_module, issue_a);
    let link_b = link_for(source_module, issue_b);

    let plan = reconcile(target_module, &[issue_b, issue_c], &[link_a, link_b.clone()]);

    assert_eq!(
        plan.creates(),
        &[NewLink {
            issue_id: issue_c,
            module_id: target_module,
        }]
    );
    assert_eq!(
        plan.moves(),
        &[LinkMove {
            link_id: link_b.id(),
            module_id: target_module,
        }]
    );
    assert_eq!(
        plan.activity(),
        &[ActivityDelta {
            issue_id: issue_b,
            old_module_id: source_module,
            new_module_id: target_module,
        }]
    );
}

#[rstest]
fn creates_links_in_request_order_for_unlinked_issues() {
    let target_module = ModuleId::new();
    let issue_a = IssueId::new();
    let issue_b = IssueId::new();

    let plan = reconcile(target_module, &[issue_a, issue_b], &[]);

    let created: Vec<IssueId> = plan.creates().iter().map(|create| create.issue_id).collect();
    assert_eq!(created, vec![issue_a, issue_b]);
    assert!(plan.moves().is_empty());
    assert!(plan.activity().is_empty());
}

#[rstest]
fn collapses_repeated_issue_ids_to_the_first_occurrence() {
    let target_module = ModuleId::new();
    let issue_a = IssueId::new();

    let plan = reconcile(target_module, &[issue_a, issue_a, issue_a], &[]);

    assert_eq!(
        plan.creates(),
        &[NewLink {
            issue_id: issue_a,
            module_id: target_module,
        }]
    );
}

#[rstest]
fn preserves_request_order_across_creates_and_moves() {
    let source_module = ModuleId::new();
    let target_module = ModuleId::new();
    let first_new = IssueId::new();
    let linked = IssueId::new();
    let second_new = IssueId::new();
    let existing = link_for(source_module, linked);

    let plan = reconcile(target_module, &[first_new, linked, second_new], &[existing]);

    let created: Vec<IssueId> = plan.creates().iter().map(|create| create.issue_id).collect();
    assert_eq!(created, vec![first_new, second_new]);
    let moved: Vec<IssueId> = plan.activity().iter().map(|delta| delta.issue_id).collect();
    assert_eq!(moved, vec![linked]);
}

#[rstest]
fn leaves_issues_already_in_the_target_module_untouched() {
    let target_module = ModuleId::new();
    let issue_a = IssueId::new();
    let existing = link_for(target_module, issue_a);

    let plan = reconcile(target_module, &[issue_a], &[existing]);

    assert!(plan.is_empty());
    assert!(plan.activity().is_empty());
}

#[rstest]
fn ignores_links_for_issues_outside_the_request() {
    let source_module = ModuleId::new();
    let target_module = ModuleId::new();
    let requested = IssueId::new();
    let unrelated = IssueId::new();
    let unrelated_link = link_for(source_module, unrelated);

    let plan = reconcile(target_module, &[requested], &[unrelated_link]);

    assert_eq!(
        plan.creates(),
        &[NewLink {
            issue_id: requested,
            module_id: target_module,
        }]
    );
    assert!(plan.moves().is_empty());
}

#[rstest]
fn keeps_the_first_link_when_an_issue_has_several() {
    let first_module = ModuleId::new();
    let second_module = ModuleId::new();
    let target_module = ModuleId::new();
    let issue_a = IssueId::new();
    let first_link = link_for(first_module, issue_a);
    let second_link = link_for(second_module, issue_a);

    let plan = reconcile(target_module, &[issue_a], &[first_link.clone(), second_link]);

    assert_eq!(
        plan.moves(),
        &[LinkMove {
            link_id: first_link.id(),
            module_id: target_module,
        }]
    );
}
