//! AI Provider Port - Interface for LLM provider integrations.
//!
//! This port abstracts all interactions with AI providers (OpenAI,
//! Anthropic, etc.), enabling the orchestration core to request
//! completions without coupling to specific vendors.
//!
//! # Design
//!
//! - Single non-streaming completion per analysis job
//! - Provider-agnostic structured prompt input
//! - Error types for the failure modes the executor must distinguish
//!   (unavailable, request failure, timeout)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::analysis::StructuredPrompt;

/// Port for AI provider interactions.
///
/// Implementations connect to external AI services and translate between
/// the provider-specific API and our domain types.
#[async_trait]
pub trait AiProvider: Send + Sync + std::fmt::Debug {
    /// Submit the prompt and return the completion.
    ///
    /// `model` overrides the provider's default model when present.
    async fn complete(
        &self,
        prompt: &StructuredPrompt,
        model: Option<&str>,
    ) -> Result<CompletionResult, ProviderError>;

    /// Get provider information (name, default model).
    fn info(&self) -> ProviderInfo;
}

/// Completion returned by a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResult {
    /// Generated content.
    pub content: String,
    /// Model that generated the response.
    pub model: String,
    /// Total tokens consumed, when reported.
    pub tokens_used: Option<u32>,
}

/// Provider identity and defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "openai", "anthropic").
    pub name: String,
    /// Default model used when a request does not override it.
    pub default_model: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, default_model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_model: default_model.into(),
        }
    }
}

/// AI provider errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Provider is not usable (missing credentials, bad configuration,
    /// vendor outage).
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// The remote call failed or returned malformed output.
    #[error("provider request failed: {message}")]
    Request {
        /// Error details.
        message: String,
    },

    /// The call exceeded its bounded timeout.
    #[error("provider call timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },
}

impl ProviderError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a request error.
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(timeout_secs: u64) -> Self {
        Self::Timeout { timeout_secs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that the trait is object-safe
    #[allow(dead_code)]
    fn assert_provider_object_safe(_: &dyn AiProvider) {}

    #[test]
    fn provider_error_displays_correctly() {
        let err = ProviderError::unavailable("ANTHROPIC_API_KEY not configured");
        assert_eq!(
            err.to_string(),
            "provider unavailable: ANTHROPIC_API_KEY not configured"
        );

        let err = ProviderError::timeout(120);
        assert_eq!(err.to_string(), "provider call timed out after 120s");

        let err = ProviderError::request("HTTP 500 from vendor");
        assert_eq!(err.to_string(), "provider request failed: HTTP 500 from vendor");
    }

    #[test]
    fn provider_info_holds_default_model() {
        let info = ProviderInfo::new("anthropic", "claude-sonnet-4-20250514");
        assert_eq!(info.name, "anthropic");
        assert_eq!(info.default_model, "claude-sonnet-4-20250514");
    }
}
