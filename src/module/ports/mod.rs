//! Port contracts for module management.
//!
//! Ports define infrastructure-agnostic interfaces used by module services.

pub mod activity;
pub mod monitor;
pub mod repository;

pub use activity::{
    ActivityPublishError, ActivityPublishResult, ActivityPublisher, IssueActivityEvent,
};
pub use monitor::FaultMonitor;
pub use repository::{
    LinkRepositoryError, LinkRepositoryResult, ModuleIssueRepository, ModuleRepository,
    ModuleRepositoryError, ModuleRepositoryResult,
};
