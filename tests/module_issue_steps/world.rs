//! Shared world state for module issue assignment BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use workstream::module::{
    adapters::memory::{
        InMemoryModuleStore, RecordingActivityPublisher, RecordingFaultMonitor,
    },
    domain::{ActorId, IssueId, ModuleId, ModuleIssueView, ProjectId, RequestContext, WorkspaceId},
    services::{ModuleService, ModuleServiceError},
};

/// Service type used by the BDD world.
pub type TestModuleService = ModuleService<
    InMemoryModuleStore,
    InMemoryModuleStore,
    RecordingActivityPublisher,
    RecordingFaultMonitor,
    DefaultClock,
>;

/// Scenario world for module issue assignment behaviour tests.
pub struct ModuleWorld {
    pub store: InMemoryModuleStore,
    pub activity: Arc<RecordingActivityPublisher>,
    pub service: TestModuleService,
    pub context: RequestContext,
    pub project_id: ProjectId,
    pub modules_by_name: HashMap<String, ModuleId>,
    pub issues_by_title: HashMap<String, IssueId>,
    pub next_sequence: u64,
    pub last_assignment: Option<Result<Vec<ModuleIssueView>, ModuleServiceError>>,
}

impl ModuleWorld {
    /// Creates a world with empty pending scenario state.
    #[must_use]
    pub fn new() -> Self {
        let store = InMemoryModuleStore::new();
        let activity = Arc::new(RecordingActivityPublisher::new());
        let service = ModuleService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::clone(&activity),
            Arc::new(RecordingFaultMonitor::new()),
            Arc::new(DefaultClock),
        );
        Self {
            store,
            activity,
            service,
            context: RequestContext::new(WorkspaceId::new(), ActorId::new()),
            project_id: ProjectId::new(),
            modules_by_name: HashMap::new(),
            issues_by_title: HashMap::new(),
            next_sequence: 1,
            last_assignment: None,
        }
    }

    /// Looks up a previously created module by name.
    pub fn module_named(&self, name: &str) -> Result<ModuleId, eyre::Report> {
        self.modules_by_name
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown module in scenario world: {name}"))
    }

    /// Looks up a previously seeded issue by title.
    pub fn issue_titled(&self, title: &str) -> Result<IssueId, eyre::Report> {
        self.issues_by_title
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown issue in scenario world: {title}"))
    }
}

impl Default for ModuleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ModuleWorld {
    ModuleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
