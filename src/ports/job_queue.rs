//! Job Queue Port - the asynchronous boundary between dispatch and execution.
//!
//! The dispatcher enqueues job ids; the worker consumes them in an
//! independent execution context. Delivery is at-least-once: duplicates are
//! possible and the executor defends against them.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::JobId;

/// Producer side of the queue, used by the dispatcher.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Enqueue a job id for asynchronous execution.
    async fn enqueue(&self, job_id: JobId) -> Result<(), QueueError>;
}

/// Consumer side of the queue, driven by the worker loop.
#[async_trait]
pub trait JobConsumer: Send {
    /// Receive the next job id.
    ///
    /// Returns `None` once the queue is closed and drained, which ends the
    /// worker loop.
    async fn dequeue(&mut self) -> Option<JobId>;
}

/// Queue errors.
#[derive(Debug, Clone, Error)]
pub enum QueueError {
    /// The queue rejected the message (closed or backend failure).
    #[error("queue unavailable: {0}")]
    Unavailable(String),
}
