//! Recording fault monitor for service and flow tests.

use std::sync::{Arc, RwLock};

use crate::module::ports::FaultMonitor;

/// Fault captured by [`RecordingFaultMonitor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFault {
    /// Operation that raised the fault.
    pub operation: &'static str,
    /// Rendered fault message.
    pub message: String,
}

/// Fault monitor that records every captured fault.
#[derive(Debug, Clone, Default)]
pub struct RecordingFaultMonitor {
    faults: Arc<RwLock<Vec<CapturedFault>>>,
}

impl RecordingFaultMonitor {
    /// Creates an empty recording monitor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the faults captured so far.
    ///
    /// Capture is best-effort, so a poisoned recorder yields an empty list.
    #[must_use]
    pub fn faults(&self) -> Vec<CapturedFault> {
        self.faults
            .read()
            .map(|faults| faults.clone())
            .unwrap_or_default()
    }
}

impl FaultMonitor for RecordingFaultMonitor {
    fn capture(&self, operation: &'static str, fault: &(dyn std::error::Error + Send + Sync)) {
        if let Ok(mut faults) = self.faults.write() {
            faults.push(CapturedFault {
                operation,
                message: fault.to_string(),
            });
        }
    }
}
