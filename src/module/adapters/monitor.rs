//! Fault monitor that reports captured faults to the log.

use crate::module::ports::FaultMonitor;

/// Fault monitor writing captures to the `tracing` error stream.
///
/// Stands in where no external error tracker is wired up, so unexpected
/// faults stay visible to operators.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFaultMonitor;

impl TracingFaultMonitor {
    /// Creates a tracing-backed fault monitor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FaultMonitor for TracingFaultMonitor {
    fn capture(&self, operation: &'static str, fault: &(dyn std::error::Error + Send + Sync)) {
        match fault.source() {
            Some(source) => {
                tracing::error!("Unexpected fault in {operation}: {fault}; caused by: {source}");
            }
            None => tracing::error!("Unexpected fault in {operation}: {fault}"),
        }
    }
}
