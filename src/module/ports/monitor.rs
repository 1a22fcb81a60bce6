//! Fault monitoring port for reporting unexpected failures.

/// Error-tracking contract.
///
/// Services report unexpected faults here before degrading to a generic
/// caller-facing error, so operators see the underlying cause even though
/// callers do not.
pub trait FaultMonitor: Send + Sync {
    /// Records a fault raised by the named operation.
    fn capture(&self, operation: &'static str, fault: &(dyn std::error::Error + Send + Sync));
}
