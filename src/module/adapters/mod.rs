//! Adapter implementations of the module ports.
//!
//! In-memory adapters back unit and behavioural tests; the `PostgreSQL`
//! adapters back production deployments. The queued activity publisher and
//! tracing fault monitor suit either.

mod activity;
pub mod memory;
mod monitor;
pub mod postgres;

pub use activity::{QueuedActivityPublisher, spawn_activity_logger};
pub use monitor::TracingFaultMonitor;
