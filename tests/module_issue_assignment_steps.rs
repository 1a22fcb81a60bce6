//! Behaviour tests for bulk issue assignment to modules.

mod module_issue_steps;

use module_issue_steps::world::{ModuleWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/module_issue_assignment.feature",
    name = "Assign unlinked issues to a module"
)]
#[tokio::test(flavor = "multi_thread")]
async fn assign_unlinked_issues(world: ModuleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/module_issue_assignment.feature",
    name = "Move an issue between modules"
)]
#[tokio::test(flavor = "multi_thread")]
async fn move_issue_between_modules(world: ModuleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/module_issue_assignment.feature",
    name = "Repeated assignment changes nothing"
)]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_assignment_is_idempotent(world: ModuleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/module_issue_assignment.feature",
    name = "Reject an assignment without issues"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reject_empty_assignment(world: ModuleWorld) {
    let _ = world;
}
