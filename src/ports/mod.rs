//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AiProvider` - capability for submitting a structured prompt to an AI
//!   vendor and receiving a completion
//! - `ProblemStore` - key-addressed storage for problems and analysis jobs,
//!   including the conditional job update the concurrency guard relies on
//! - `JobQueue` / `JobConsumer` - asynchronous hand-off between the
//!   dispatcher and the executor, at-least-once delivery

mod ai_provider;
mod job_queue;
mod problem_store;

pub use ai_provider::{AiProvider, CompletionResult, ProviderError, ProviderInfo};
pub use job_queue::{JobConsumer, JobQueue, QueueError};
pub use problem_store::{ProblemStore, StoreError};
