//! Queue-backed activity publisher decoupling callers from activity
//! consumers.

use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::module::ports::{
    ActivityPublishError, ActivityPublishResult, ActivityPublisher, IssueActivityEvent,
};

/// Activity publisher backed by an unbounded in-process queue.
///
/// Publishing enqueues without blocking; the paired receiver is consumed by
/// whatever worker the embedding application runs, typically
/// [`spawn_activity_logger`].
#[derive(Debug, Clone)]
pub struct QueuedActivityPublisher {
    sender: UnboundedSender<IssueActivityEvent>,
}

impl QueuedActivityPublisher {
    /// Creates a publisher and the receiver draining its queue.
    #[must_use]
    pub fn unbounded() -> (Self, UnboundedReceiver<IssueActivityEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl ActivityPublisher for QueuedActivityPublisher {
    async fn publish(&self, event: IssueActivityEvent) -> ActivityPublishResult<()> {
        self.sender
            .send(event)
            .map_err(|_| ActivityPublishError::StreamClosed)
    }
}

/// Spawns a task that drains the activity queue into the log.
///
/// The task ends when every paired publisher has been dropped.
pub fn spawn_activity_logger(
    mut receiver: UnboundedReceiver<IssueActivityEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = receiver.recv().await {
            match serde_json::to_string(&event) {
                Ok(payload) => {
                    tracing::info!("Module activity for module {}: {payload}", event.module_id);
                }
                Err(error) => {
                    tracing::warn!("Failed to serialise module activity event: {error}");
                }
            }
        }
    })
}
