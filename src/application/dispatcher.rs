//! Analysis Dispatcher - accepts analysis requests on the synchronous path.
//!
//! Validates the request, creates the pending job, and hands off to the
//! queue without awaiting the provider. Input errors surface here, before
//! anything is enqueued, so a caller never learns about a bad request from
//! a silently failed background job.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::application::{ProviderRegistry, RegistryError};
use crate::domain::analysis::{
    AnalysisJob, AnalysisOptions, AnalysisOutcome, AnalysisStatus, PromptComposer,
};
use crate::domain::foundation::{DomainError, JobId, ProblemId};
use crate::ports::{JobQueue, ProblemStore, QueueError, StoreError};

/// Handle returned to the caller when a job is accepted.
#[derive(Debug, Clone, Serialize)]
pub struct JobHandle {
    pub job_id: JobId,
    pub problem_id: ProblemId,
    pub status: AnalysisStatus,
}

/// Read-path view of a problem's current job cycle.
#[derive(Debug, Clone, Serialize)]
pub struct JobStatusView {
    pub job_id: JobId,
    pub problem_id: ProblemId,
    pub status: AnalysisStatus,
    pub outcome: Option<AnalysisOutcome>,
    pub failure_reason: Option<String>,
    pub updated_at: String,
}

/// Errors from [`AnalysisDispatcher::request_analysis`].
#[derive(Debug, thiserror::Error)]
pub enum RequestAnalysisError {
    #[error("problem not found: {0}")]
    ProblemNotFound(ProblemId),

    #[error("problem cannot be analyzed: {0}")]
    InvalidProblem(#[source] DomainError),

    #[error("no AI provider available; configure at least one API key")]
    NoProviderAvailable,

    #[error(transparent)]
    UnknownProvider(#[from] RegistryError),

    #[error("analysis already in progress for problem {problem_id} (status: {status})")]
    AnalysisAlreadyInProgress {
        problem_id: ProblemId,
        status: AnalysisStatus,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Errors from [`AnalysisDispatcher::get_job_status`].
#[derive(Debug, thiserror::Error)]
pub enum JobStatusError {
    #[error("problem not found: {0}")]
    ProblemNotFound(ProblemId),

    #[error("no analysis has been requested for problem {0}")]
    NoAnalysisRequested(ProblemId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Accepts analysis requests and exposes the job read path.
pub struct AnalysisDispatcher {
    store: Arc<dyn ProblemStore>,
    queue: Arc<dyn JobQueue>,
    registry: Arc<ProviderRegistry>,
}

impl AnalysisDispatcher {
    pub fn new(
        store: Arc<dyn ProblemStore>,
        queue: Arc<dyn JobQueue>,
        registry: Arc<ProviderRegistry>,
    ) -> Self {
        Self {
            store,
            queue,
            registry,
        }
    }

    /// Requests analysis of a problem and returns immediately.
    ///
    /// A fresh job cycle supersedes any terminal job for the same problem.
    /// A non-terminal job rejects the request unless `force_retry` is set,
    /// in which case the in-flight cycle is superseded and its executor
    /// callback becomes a no-op.
    pub async fn request_analysis(
        &self,
        problem_id: ProblemId,
        options: AnalysisOptions,
        force_retry: bool,
    ) -> Result<JobHandle, RequestAnalysisError> {
        let problem = self
            .store
            .get_problem(problem_id)
            .await?
            .ok_or(RequestAnalysisError::ProblemNotFound(problem_id))?;

        // Surface composition failures now rather than from a background job.
        PromptComposer::compose(&problem, &options)
            .map_err(RequestAnalysisError::InvalidProblem)?;

        if self.registry.is_empty() {
            return Err(RequestAnalysisError::NoProviderAvailable);
        }
        self.registry.resolve(&options.provider)?;

        if let Some(existing) = self.store.find_job_by_problem(problem_id).await? {
            if !existing.is_terminal() && !force_retry {
                return Err(RequestAnalysisError::AnalysisAlreadyInProgress {
                    problem_id,
                    status: existing.status(),
                });
            }
            debug!(
                problem_id = %problem_id,
                superseded_job = %existing.id(),
                "Starting fresh job cycle"
            );
        }

        let job = AnalysisJob::new(problem_id, options);
        let handle = JobHandle {
            job_id: job.id(),
            problem_id,
            status: job.status(),
        };

        self.store.create_job(&job).await?;
        self.queue.enqueue(job.id()).await?;

        info!(
            job_id = %handle.job_id,
            problem_id = %problem_id,
            provider = %job.options().provider,
            "Analysis job enqueued"
        );

        Ok(handle)
    }

    /// Returns the status of a problem's current job cycle.
    pub async fn get_job_status(
        &self,
        problem_id: ProblemId,
    ) -> Result<JobStatusView, JobStatusError> {
        if self.store.get_problem(problem_id).await?.is_none() {
            return Err(JobStatusError::ProblemNotFound(problem_id));
        }

        let job = self
            .store
            .find_job_by_problem(problem_id)
            .await?
            .ok_or(JobStatusError::NoAnalysisRequested(problem_id))?;

        Ok(JobStatusView {
            job_id: job.id(),
            problem_id,
            status: job.status(),
            outcome: job.outcome().cloned(),
            failure_reason: job.failure_reason().map(str::to_string),
            updated_at: job.updated_at().to_rfc3339(),
        })
    }
}
