//! Then steps for module issue assignment BDD scenarios.

use super::world::{ModuleWorld, run_async};
use rstest_bdd_macros::then;
use workstream::module::services::ModuleServiceError;

#[then(r#"the module "{module}" contains exactly the issues "{first}" and "{second}""#)]
fn module_contains_two_issues(
    world: &ModuleWorld,
    module: String,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let titles = linked_issue_titles(world, &module)?;
    let mut expected = vec![first, second];
    expected.sort();
    if titles != expected {
        return Err(eyre::eyre!(
            "expected module {module} to contain {expected:?}, found {titles:?}"
        ));
    }
    Ok(())
}

#[then(r#"the module "{module}" contains exactly the issue "{title}""#)]
fn module_contains_one_issue(
    world: &ModuleWorld,
    module: String,
    title: String,
) -> Result<(), eyre::Report> {
    let titles = linked_issue_titles(world, &module)?;
    if titles != vec![title.clone()] {
        return Err(eyre::eyre!(
            "expected module {module} to contain only {title}, found {titles:?}"
        ));
    }
    Ok(())
}

#[then(r#"the module "{module}" has no linked issues"#)]
fn module_has_no_issues(world: &ModuleWorld, module: String) -> Result<(), eyre::Report> {
    let titles = linked_issue_titles(world, &module)?;
    if !titles.is_empty() {
        return Err(eyre::eyre!(
            "expected module {module} to be empty, found {titles:?}"
        ));
    }
    Ok(())
}

#[then("a single activity event records two new links")]
fn single_event_with_two_links(world: &ModuleWorld) -> Result<(), eyre::Report> {
    let events = world
        .activity
        .events()
        .map_err(|err| eyre::eyre!("read recorded events: {err}"))?;
    if events.len() != 1 {
        return Err(eyre::eyre!("expected one event, found {}", events.len()));
    }
    let event = events
        .first()
        .ok_or_else(|| eyre::eyre!("missing recorded event"))?;
    if event.created.len() != 2 || !event.moved.is_empty() {
        return Err(eyre::eyre!(
            "expected two created links and no moves, found {} and {}",
            event.created.len(),
            event.moved.len()
        ));
    }
    Ok(())
}

#[then(r#"the latest activity event records a move from "{source}" to "{target}""#)]
fn latest_event_records_move(
    world: &ModuleWorld,
    source: String,
    target: String,
) -> Result<(), eyre::Report> {
    let source_id = world.module_named(&source)?;
    let target_id = world.module_named(&target)?;
    let events = world
        .activity
        .events()
        .map_err(|err| eyre::eyre!("read recorded events: {err}"))?;
    let event = events
        .last()
        .ok_or_else(|| eyre::eyre!("no recorded events"))?;
    if !event.created.is_empty() {
        return Err(eyre::eyre!("expected no created links in a pure move"));
    }
    let delta = event
        .moved
        .first()
        .ok_or_else(|| eyre::eyre!("expected one move delta"))?;
    if event.moved.len() != 1
        || delta.old_module_id != source_id
        || delta.new_module_id != target_id
    {
        return Err(eyre::eyre!(
            "expected a single move from {source} to {target}, found {:?}",
            event.moved
        ));
    }
    Ok(())
}

#[then("the latest activity event records no changes")]
fn latest_event_records_nothing(world: &ModuleWorld) -> Result<(), eyre::Report> {
    let events = world
        .activity
        .events()
        .map_err(|err| eyre::eyre!("read recorded events: {err}"))?;
    let event = events
        .last()
        .ok_or_else(|| eyre::eyre!("no recorded events"))?;
    if !event.created.is_empty() || !event.moved.is_empty() {
        return Err(eyre::eyre!(
            "expected an empty event, found {} creates and {} moves",
            event.created.len(),
            event.moved.len()
        ));
    }
    Ok(())
}

#[then("the assignment is rejected for missing issue ids")]
fn assignment_rejected_for_missing_ids(world: &ModuleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_assignment
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing assignment result in scenario world"))?;
    if !matches!(result, Err(ModuleServiceError::EmptyIssueList)) {
        return Err(eyre::eyre!("expected an empty issue list error, got {result:?}"));
    }
    Ok(())
}

#[then("no activity event is published")]
fn no_activity_published(world: &ModuleWorld) -> Result<(), eyre::Report> {
    let events = world
        .activity
        .events()
        .map_err(|err| eyre::eyre!("read recorded events: {err}"))?;
    if !events.is_empty() {
        return Err(eyre::eyre!("expected no events, found {}", events.len()));
    }
    Ok(())
}

/// Lists the titles of issues currently linked to the module, sorted.
fn linked_issue_titles(world: &ModuleWorld, module: &str) -> Result<Vec<String>, eyre::Report> {
    let module_id = world.module_named(module)?;
    let views = run_async(world.service.list_module_issues(
        &world.context,
        world.project_id,
        module_id,
        None,
    ))
    .map_err(|err| eyre::eyre!("list module issues: {err}"))?;
    let mut titles: Vec<String> = views.into_iter().map(|view| view.issue.name).collect();
    titles.sort();
    Ok(titles)
}
