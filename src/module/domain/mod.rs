//! Domain model for module management.
//!
//! The module domain models modules as named issue groupings with lifecycle
//! status and membership, the links tying issues to their module, and the
//! pure reconciliation of bulk assignment requests against existing links,
//! keeping all infrastructure concerns outside of the domain boundary.

mod context;
mod error;
mod ids;
mod link;
mod module;
mod reconcile;
mod view;

pub use context::RequestContext;
pub use error::{ModuleDomainError, ParseModuleStatusError};
pub use ids::{
    ActorId, IssueId, LabelId, LinkId, ModuleId, ModuleName, ProjectId, StateId, WebLinkId,
    WorkspaceId,
};
pub use link::{ModuleIssueLink, ModuleWebLink, PersistedLinkData};
pub use module::{Module, ModuleDraft, ModuleStatus, PersistedModuleData};
pub use reconcile::{ActivityDelta, LinkMove, LinkPlan, NewLink, reconcile};
pub use view::{
    IssueSummary, LabelSummary, MemberSummary, ModuleIssueView, ModuleView, StateSummary,
};
