//! In-memory adapters for module management tests.

mod activity;
mod monitor;
mod store;

pub use activity::RecordingActivityPublisher;
pub use monitor::{CapturedFault, RecordingFaultMonitor};
pub use store::{InMemoryModuleStore, IssueSeed};
