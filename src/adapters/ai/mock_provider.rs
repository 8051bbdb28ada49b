//! Mock AI Provider for testing.
//!
//! Provides a configurable mock implementation of the AiProvider port,
//! allowing tests to run without calling real AI APIs.
//!
//! # Features
//!
//! - Pre-configured responses (consumed in order)
//! - Simulated delays for timeout testing
//! - Failure injection for resilience testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockProvider::new()
//!     .with_response("### 1. EXISTING SOLUTIONS REVIEW\n...")
//!     .with_delay(Duration::from_millis(100));
//!
//! let result = provider.complete(&prompt, None).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::analysis::StructuredPrompt;
use crate::ports::{AiProvider, CompletionResult, ProviderError, ProviderInfo};

/// A scripted mock reply.
#[derive(Debug, Clone)]
enum MockReply {
    Success(String),
    Failure(MockFailure),
}

/// Mock failure kinds mirroring the port's error taxonomy.
#[derive(Debug, Clone)]
pub enum MockFailure {
    /// Simulate a provider without credentials or with a vendor outage.
    Unavailable { message: String },
    /// Simulate a failed or malformed remote call.
    Request { message: String },
    /// Simulate a provider-side timeout.
    Timeout { timeout_secs: u64 },
}

impl From<MockFailure> for ProviderError {
    fn from(failure: MockFailure) -> Self {
        match failure {
            MockFailure::Unavailable { message } => ProviderError::unavailable(message),
            MockFailure::Request { message } => ProviderError::request(message),
            MockFailure::Timeout { timeout_secs } => ProviderError::timeout(timeout_secs),
        }
    }
}

/// Recorded call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: StructuredPrompt,
    pub model: Option<String>,
}

/// Mock AI provider for testing.
///
/// Configurable to return specific responses, simulate delays, or inject
/// failures. Replies are consumed in order; once exhausted, a default
/// success response is returned.
#[derive(Debug, Clone)]
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    delay: Duration,
    info: ProviderInfo,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
            info: ProviderInfo::new("mock", "mock-model-1"),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Success(content.into()));
        self
    }

    /// Adds a failure to the queue.
    pub fn with_failure(self, failure: MockFailure) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Failure(failure));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockReply::Success("Mock analysis response".to_string()))
    }
}

#[async_trait]
impl AiProvider for MockProvider {
    async fn complete(
        &self,
        prompt: &StructuredPrompt,
        model: Option<&str>,
    ) -> Result<CompletionResult, ProviderError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.clone(),
            model: model.map(str::to_string),
        });

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_reply() {
            MockReply::Success(content) => Ok(CompletionResult {
                content,
                model: model.unwrap_or(&self.info.default_model).to_string(),
                tokens_used: Some(64),
            }),
            MockReply::Failure(failure) => Err(failure.into()),
        }
    }

    fn info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
