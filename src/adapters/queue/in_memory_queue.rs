//! In-memory implementation of the job queue ports.
//!
//! An unbounded tokio mpsc channel: the dispatcher holds the producer
//! half, the worker loop drives the consumer half. A durable broker
//! adapter would implement the same port pair for production.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::foundation::JobId;
use crate::ports::{JobConsumer, JobQueue, QueueError};

/// Producer half of the in-memory queue.
#[derive(Clone)]
pub struct InMemoryJobQueue {
    sender: mpsc::UnboundedSender<JobId>,
}

/// Consumer half of the in-memory queue.
pub struct InMemoryJobConsumer {
    receiver: mpsc::UnboundedReceiver<JobId>,
}

impl InMemoryJobQueue {
    /// Creates a connected queue/consumer pair.
    pub fn new() -> (Self, InMemoryJobConsumer) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, InMemoryJobConsumer { receiver })
    }
}

#[async_trait]
impl JobQueue for InMemoryJobQueue {
    async fn enqueue(&self, job_id: JobId) -> Result<(), QueueError> {
        self.sender
            .send(job_id)
            .map_err(|_| QueueError::Unavailable("consumer dropped".to_string()))
    }
}

#[async_trait]
impl JobConsumer for InMemoryJobConsumer {
    async fn dequeue(&mut self) -> Option<JobId> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_in_fifo_order() {
        let (queue, mut consumer) = InMemoryJobQueue::new();
        let first = JobId::new();
        let second = JobId::new();

        queue.enqueue(first).await.unwrap();
        queue.enqueue(second).await.unwrap();

        assert_eq!(consumer.dequeue().await, Some(first));
        assert_eq!(consumer.dequeue().await, Some(second));
    }

    #[tokio::test]
    async fn dequeue_returns_none_after_producers_drop() {
        let (queue, mut consumer) = InMemoryJobQueue::new();
        queue.enqueue(JobId::new()).await.unwrap();
        drop(queue);

        assert!(consumer.dequeue().await.is_some());
        assert!(consumer.dequeue().await.is_none());
    }

    #[tokio::test]
    async fn enqueue_fails_after_consumer_drop() {
        let (queue, consumer) = InMemoryJobQueue::new();
        drop(consumer);

        let err = queue.enqueue(JobId::new()).await.unwrap_err();
        assert!(matches!(err, QueueError::Unavailable(_)));
    }
}
