//! Recording activity publisher for service and flow tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::module::ports::{
    ActivityPublishError, ActivityPublishResult, ActivityPublisher, IssueActivityEvent,
};

/// Activity publisher that records every event it receives.
///
/// The rejecting variant refuses every event, for exercising publish-failure
/// tolerance.
#[derive(Debug, Clone, Default)]
pub struct RecordingActivityPublisher {
    events: Arc<RwLock<Vec<IssueActivityEvent>>>,
    reject: bool,
}

impl RecordingActivityPublisher {
    /// Creates a publisher that accepts and records events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a publisher that rejects every event as closed.
    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
            reject: true,
        }
    }

    /// Returns the events recorded so far.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the recorder lock is poisoned.
    pub fn events(&self) -> ActivityPublishResult<Vec<IssueActivityEvent>> {
        let events = self.events.read().map_err(|err| {
            ActivityPublishError::transport(std::io::Error::other(err.to_string()))
        })?;
        Ok(events.clone())
    }
}

#[async_trait]
impl ActivityPublisher for RecordingActivityPublisher {
    async fn publish(&self, event: IssueActivityEvent) -> ActivityPublishResult<()> {
        if self.reject {
            return Err(ActivityPublishError::StreamClosed);
        }
        let mut events = self.events.write().map_err(|err| {
            ActivityPublishError::transport(std::io::Error::other(err.to_string()))
        })?;
        events.push(event);
        Ok(())
    }
}
