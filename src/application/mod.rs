//! Application layer - orchestration of the analysis lifecycle.
//!
//! The dispatcher accepts analysis requests on the synchronous path, the
//! executor runs them behind the queue boundary, and the provider registry
//! maps provider identifiers to capabilities for both.

mod dispatcher;
mod executor;
mod provider_registry;

pub use dispatcher::{
    AnalysisDispatcher, JobHandle, JobStatusError, JobStatusView, RequestAnalysisError,
};
pub use executor::{AnalysisExecutor, ExecutionOutcome};
pub use provider_registry::{ProviderRegistry, RegistryError};
