//! Behavioural integration tests for the in-memory module adapters.
//!
//! These tests exercise the in-memory store, activity recorder, and fault
//! monitor in realistic higher-level flows, verifying that they correctly
//! implement the repository contracts when driven through the module
//! service.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]

use std::sync::Arc;

use mockable::DefaultClock;
use tokio::runtime::Runtime;
use workstream::module::{
    adapters::memory::{
        InMemoryModuleStore, IssueSeed, RecordingActivityPublisher, RecordingFaultMonitor,
    },
    domain::{
        ActorId, IssueId, LabelId, LabelSummary, MemberSummary, ModuleId, ModuleStatus,
        ModuleView, ModuleWebLink, ProjectId, RequestContext, StateId, StateSummary, WebLinkId,
        WorkspaceId,
    },
    services::{CreateModuleRequest, ModuleService, ModuleServiceError},
};

/// Service type wired to the in-memory adapters.
type FlowService = ModuleService<
    InMemoryModuleStore,
    InMemoryModuleStore,
    RecordingActivityPublisher,
    RecordingFaultMonitor,
    DefaultClock,
>;

struct FlowHarness {
    store: InMemoryModuleStore,
    activity: Arc<RecordingActivityPublisher>,
    service: FlowService,
    context: RequestContext,
    project_id: ProjectId,
}

/// Creates a tokio runtime for async operations in tests.
fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Creates a service over a fresh store with one seeded project.
fn setup() -> FlowHarness {
    let store = InMemoryModuleStore::new();
    let activity = Arc::new(RecordingActivityPublisher::new());
    let context = RequestContext::new(WorkspaceId::new(), ActorId::new());
    let project_id = ProjectId::new();
    store
        .seed_project(context.workspace_id(), project_id)
        .expect("seed project");
    let service = ModuleService::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::clone(&activity),
        Arc::new(RecordingFaultMonitor::new()),
        Arc::new(DefaultClock),
    );
    FlowHarness {
        store,
        activity,
        service,
        context,
        project_id,
    }
}

/// Seeds an issue and returns its identifier.
fn seed_issue(harness: &FlowHarness, title: &str, sequence_id: u64) -> IssueId {
    let issue_id = IssueId::new();
    harness
        .store
        .seed_issue(IssueSeed::new(issue_id, title, sequence_id))
        .expect("seed issue");
    issue_id
}

/// Creates a module through the service and returns its view.
fn create_module(rt: &Runtime, harness: &FlowHarness, name: &str) -> ModuleView {
    rt.block_on(harness.service.create_module(
        &harness.context,
        harness.project_id,
        CreateModuleRequest::new(name),
    ))
    .expect("create module")
}

/// Returns the module's linked issue ids, newest link first.
fn linked_issue_ids(rt: &Runtime, harness: &FlowHarness, module_id: ModuleId) -> Vec<IssueId> {
    rt.block_on(harness.service.list_module_issues(
        &harness.context,
        harness.project_id,
        module_id,
        None,
    ))
    .expect("list module issues")
    .into_iter()
    .map(|view| view.issue.id)
    .collect()
}

// ============================================================================
// Assignment Flows
// ============================================================================

/// Walks a full grouping flow across two modules, verifying the returned
/// views, the per-module link placement, and the recorded activity trail.
#[test]
fn assignment_flow_moves_issues_between_modules() {
    let rt = test_runtime();
    let harness = setup();

    let issue_a = seed_issue(&harness, "Fix cart totals", 1);
    let issue_b = seed_issue(&harness, "Persist payment method", 2);
    let issue_c = seed_issue(&harness, "Add retry on timeout", 3);

    let checkout = create_module(&rt, &harness, "Checkout flow");
    let payments = create_module(&rt, &harness, "Payments hardening");

    // Initial grouping puts A and B into the checkout module
    let views = rt
        .block_on(harness.service.add_issues_to_module(
            &harness.context,
            harness.project_id,
            checkout.module.id(),
            &[issue_a, issue_b],
        ))
        .expect("first assignment");
    assert_eq!(views.len(), 2);

    // Regrouping B and C into payments moves B and creates a link for C
    let views = rt
        .block_on(harness.service.add_issues_to_module(
            &harness.context,
            harness.project_id,
            payments.module.id(),
            &[issue_b, issue_c],
        ))
        .expect("second assignment");
    assert_eq!(views.len(), 2);

    assert_eq!(
        linked_issue_ids(&rt, &harness, checkout.module.id()),
        vec![issue_a]
    );
    let mut payment_issues = linked_issue_ids(&rt, &harness, payments.module.id());
    payment_issues.sort_unstable_by_key(|id| id.into_inner());
    let mut expected = vec![issue_b, issue_c];
    expected.sort_unstable_by_key(|id| id.into_inner());
    assert_eq!(payment_issues, expected);

    // Listing is newest first, so the payments module leads
    let listed = rt
        .block_on(
            harness
                .service
                .list_modules(&harness.context, harness.project_id),
        )
        .expect("list modules");
    let names: Vec<&str> = listed
        .iter()
        .map(|view| view.module.name().as_str())
        .collect();
    assert_eq!(names, vec!["Payments hardening", "Checkout flow"]);

    let events = harness.activity.events().expect("recorded events");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].created.len(), 2);
    assert!(events[0].moved.is_empty());
    assert_eq!(events[1].created.len(), 1);
    assert_eq!(events[1].moved.len(), 1);
    assert_eq!(events[1].moved[0].issue_id, issue_b);
    assert_eq!(events[1].moved[0].old_module_id, checkout.module.id());
    assert_eq!(events[1].moved[0].new_module_id, payments.module.id());
}

/// Moves one issue through three modules and verifies the link record keeps
/// its identity and creation audit while the update audit follows the moves.
#[test]
fn reassignment_preserves_link_identity() {
    let rt = test_runtime();
    let harness = setup();

    let issue = seed_issue(&harness, "Provision staging cluster", 1);
    let discovery = create_module(&rt, &harness, "Discovery");
    let build = create_module(&rt, &harness, "Build");
    let launch = create_module(&rt, &harness, "Launch");

    for module_id in [discovery.module.id(), build.module.id(), launch.module.id()] {
        rt.block_on(harness.service.add_issues_to_module(
            &harness.context,
            harness.project_id,
            module_id,
            &[issue],
        ))
        .expect("assignment");
    }

    let first_links = rt
        .block_on(harness.service.list_module_issues(
            &harness.context,
            harness.project_id,
            launch.module.id(),
            None,
        ))
        .expect("final listing");
    assert_eq!(first_links.len(), 1);
    let link = &first_links[0].link;
    assert_eq!(link.module_id(), launch.module.id());
    assert_eq!(link.created_by(), harness.context.actor_id());
    assert_eq!(link.updated_by(), harness.context.actor_id());
    assert!(link.created_at() <= link.updated_at());

    assert!(linked_issue_ids(&rt, &harness, discovery.module.id()).is_empty());
    assert!(linked_issue_ids(&rt, &harness, build.module.id()).is_empty());

    let events = harness.activity.events().expect("recorded events");
    assert_eq!(events.len(), 3);
    assert_eq!(events[1].moved[0].old_module_id, discovery.module.id());
    assert_eq!(events[1].moved[0].new_module_id, build.module.id());
    assert_eq!(events[2].moved[0].old_module_id, build.module.id());
    assert_eq!(events[2].moved[0].new_module_id, launch.module.id());
}

// ============================================================================
// View Materialization
// ============================================================================

/// Verifies the materialized module view carries leads, members, web links,
/// and fully summarized issues in one read.
#[test]
fn module_view_surfaces_issue_relations() {
    let rt = test_runtime();
    let harness = setup();

    let lead = MemberSummary {
        id: ActorId::new(),
        display_name: "Priya Sharma".to_owned(),
        avatar_url: Some("https://avatars.example/priya.png".to_owned()),
    };
    harness.store.seed_member(lead.clone()).expect("seed lead");

    let review_state = StateSummary {
        id: StateId::new(),
        name: "In review".to_owned(),
        group: "started".to_owned(),
        color: "#f3a712".to_owned(),
    };
    harness
        .store
        .seed_state(review_state.clone())
        .expect("seed state");

    let backend_label = LabelSummary {
        id: LabelId::new(),
        name: "Backend".to_owned(),
        color: "#4c6ef5".to_owned(),
    };
    let payments_label = LabelSummary {
        id: LabelId::new(),
        name: "Payments".to_owned(),
        color: "#12b886".to_owned(),
    };
    harness
        .store
        .seed_label(backend_label.clone())
        .expect("seed label");
    harness
        .store
        .seed_label(payments_label.clone())
        .expect("seed label");

    let parent = IssueId::new();
    harness
        .store
        .seed_issue(
            IssueSeed::new(parent, "Persist payment method", 7)
                .with_state(review_state.id)
                .with_labels([backend_label.id, payments_label.id])
                .with_assignees([lead.id]),
        )
        .expect("seed parent issue");
    harness
        .store
        .seed_issue(
            IssueSeed::new(IssueId::new(), "Cover the declined-card path", 8).with_parent(parent),
        )
        .expect("seed sub-issue");

    let module = rt
        .block_on(harness.service.create_module(
            &harness.context,
            harness.project_id,
            CreateModuleRequest::new("Checkout flow")
                .with_status(ModuleStatus::InProgress)
                .with_lead(lead.id)
                .with_members([lead.id]),
        ))
        .expect("create module");
    harness
        .store
        .seed_web_link(ModuleWebLink {
            id: WebLinkId::new(),
            module_id: module.module.id(),
            title: "Rollout runbook".to_owned(),
            url: "https://wiki.example/checkout-rollout".to_owned(),
        })
        .expect("seed web link");
    rt.block_on(harness.service.add_issues_to_module(
        &harness.context,
        harness.project_id,
        module.module.id(),
        &[parent],
    ))
    .expect("assignment");

    let view = rt
        .block_on(harness.service.get_module(
            &harness.context,
            harness.project_id,
            module.module.id(),
        ))
        .expect("module view");

    assert_eq!(view.module.status(), ModuleStatus::InProgress);
    assert_eq!(view.lead, Some(lead.clone()));
    assert_eq!(view.members, vec![lead.clone()]);
    assert_eq!(view.web_links.len(), 1);
    assert_eq!(view.web_links[0].title, "Rollout runbook");

    assert_eq!(view.issue_links.len(), 1);
    let summary = &view.issue_links[0].issue;
    assert_eq!(summary.id, parent);
    assert_eq!(summary.sequence_id, 7);
    assert_eq!(summary.state, Some(review_state));
    assert_eq!(summary.labels, vec![backend_label, payments_label]);
    assert_eq!(summary.assignees, vec![lead]);
    assert_eq!(summary.sub_issues_count, 1);
}

// ============================================================================
// Name Scoping
// ============================================================================

/// A module name is unique within its project but free to repeat in another.
#[test]
fn module_names_are_scoped_per_project() {
    let rt = test_runtime();
    let harness = setup();
    let other_project = ProjectId::new();
    harness
        .store
        .seed_project(harness.context.workspace_id(), other_project)
        .expect("seed project");

    create_module(&rt, &harness, "Checkout flow");
    rt.block_on(harness.service.create_module(
        &harness.context,
        other_project,
        CreateModuleRequest::new("Checkout flow"),
    ))
    .expect("same name in another project");

    let result = rt.block_on(harness.service.create_module(
        &harness.context,
        harness.project_id,
        CreateModuleRequest::new("Checkout flow"),
    ));
    assert!(matches!(result, Err(ModuleServiceError::NameConflict(_))));

    let listed = rt
        .block_on(
            harness
                .service
                .list_modules(&harness.context, harness.project_id),
        )
        .expect("list modules");
    assert_eq!(listed.len(), 1);
}
