//! When steps for module issue assignment BDD scenarios.

use super::world::{ModuleWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"the issues "{first}" and "{second}" are assigned to "{module}""#)]
fn assign_two_issues(
    world: &mut ModuleWorld,
    first: String,
    second: String,
    module: String,
) -> Result<(), eyre::Report> {
    let module_id = world.module_named(&module)?;
    let first_id = world.issue_titled(&first)?;
    let second_id = world.issue_titled(&second)?;
    world.last_assignment = Some(run_async(world.service.add_issues_to_module(
        &world.context,
        world.project_id,
        module_id,
        &[first_id, second_id],
    )));
    Ok(())
}

#[when(r#"the issue "{title}" is assigned to "{module}""#)]
fn assign_one_issue(
    world: &mut ModuleWorld,
    title: String,
    module: String,
) -> Result<(), eyre::Report> {
    let module_id = world.module_named(&module)?;
    let issue_id = world.issue_titled(&title)?;
    world.last_assignment = Some(run_async(world.service.add_issues_to_module(
        &world.context,
        world.project_id,
        module_id,
        &[issue_id],
    )));
    Ok(())
}

#[when(r#"an empty issue list is assigned to "{module}""#)]
fn assign_nothing(world: &mut ModuleWorld, module: String) -> Result<(), eyre::Report> {
    let module_id = world.module_named(&module)?;
    world.last_assignment = Some(run_async(world.service.add_issues_to_module(
        &world.context,
        world.project_id,
        module_id,
        &[],
    )));
    Ok(())
}
