//! Given steps for module issue assignment BDD scenarios.

use super::world::{ModuleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use workstream::module::{
    adapters::memory::IssueSeed, domain::IssueId, services::CreateModuleRequest,
};

#[given("a project registered in the workspace")]
fn project_registered(world: &mut ModuleWorld) -> Result<(), eyre::Report> {
    world
        .store
        .seed_project(world.context.workspace_id(), world.project_id)
        .wrap_err("register scenario project")?;
    Ok(())
}

#[given(r#"a module named "{name}""#)]
fn module_named(world: &mut ModuleWorld, name: String) -> Result<(), eyre::Report> {
    let view = run_async(world.service.create_module(
        &world.context,
        world.project_id,
        CreateModuleRequest::new(name.clone()),
    ))
    .wrap_err("create scenario module")?;
    world.modules_by_name.insert(name, view.module.id());
    Ok(())
}

#[given(r#"an issue titled "{title}""#)]
fn issue_titled(world: &mut ModuleWorld, title: String) -> Result<(), eyre::Report> {
    let issue_id = IssueId::new();
    world
        .store
        .seed_issue(IssueSeed::new(issue_id, title.clone(), world.next_sequence))
        .wrap_err("seed scenario issue")?;
    world.next_sequence += 1;
    world.issues_by_title.insert(title, issue_id);
    Ok(())
}

#[given(r#"the issue "{title}" is already linked to "{module}""#)]
fn issue_already_linked(
    world: &mut ModuleWorld,
    title: String,
    module: String,
) -> Result<(), eyre::Report> {
    let module_id = world.module_named(&module)?;
    let issue_id = world.issue_titled(&title)?;
    run_async(world.service.add_issues_to_module(
        &world.context,
        world.project_id,
        module_id,
        &[issue_id],
    ))
    .wrap_err("link scenario issue")?;
    Ok(())
}
