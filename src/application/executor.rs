//! Analysis Executor - runs enqueued jobs behind the async boundary.
//!
//! The executor re-fetches each delivered job and claims it with a
//! conditional update, so duplicate queue deliveries and superseded job
//! cycles fall out as no-ops. Provider, composer, and timeout failures end
//! at the job boundary as a Failed status with a recorded reason; only
//! storage failures propagate, since the worker cannot make progress
//! without its store.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::application::ProviderRegistry;
use crate::domain::analysis::{
    AnalysisJob, AnalysisOutcome, AnalysisReport, AnalysisStatus, PromptComposer,
};
use crate::domain::foundation::JobId;
use crate::domain::problem::Problem;
use crate::ports::{CompletionResult, JobConsumer, ProblemStore, ProviderError, StoreError};

/// What an execution attempt did, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Job was missing, superseded, or already claimed; nothing was mutated.
    Skipped,
    /// Job reached Completed.
    Completed,
    /// Job reached Failed.
    Failed,
}

/// Runs analysis jobs delivered by the queue.
pub struct AnalysisExecutor {
    store: Arc<dyn ProblemStore>,
    registry: Arc<ProviderRegistry>,
    call_timeout: Duration,
}

impl AnalysisExecutor {
    pub fn new(
        store: Arc<dyn ProblemStore>,
        registry: Arc<ProviderRegistry>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            store,
            registry,
            call_timeout,
        }
    }

    /// Consumes job ids until the queue closes.
    ///
    /// Returns an error only on storage failure; per-job failures are
    /// recorded on the job and never end the loop.
    pub async fn run_worker(
        &self,
        mut consumer: Box<dyn JobConsumer>,
    ) -> Result<(), StoreError> {
        while let Some(job_id) = consumer.dequeue().await {
            match self.execute(job_id).await {
                Ok(outcome) => {
                    debug!(job_id = %job_id, outcome = ?outcome, "Job execution finished")
                }
                Err(err) => {
                    error!(job_id = %job_id, error = %err, "Storage failure in worker");
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// Executes one delivered job id.
    pub async fn execute(&self, job_id: JobId) -> Result<ExecutionOutcome, StoreError> {
        let Some(mut job) = self.store.find_job(job_id).await? else {
            debug!(job_id = %job_id, "Job missing or superseded; skipping");
            return Ok(ExecutionOutcome::Skipped);
        };

        if job.status() != AnalysisStatus::Pending {
            debug!(job_id = %job_id, status = %job.status(), "Job already claimed; skipping");
            return Ok(ExecutionOutcome::Skipped);
        }

        // Claim the job. Losing the conditional update means another
        // executor instance won the race; back off without side effects.
        if let Err(err) = job.claim() {
            debug!(job_id = %job_id, error = %err, "Stale claim attempt ignored");
            return Ok(ExecutionOutcome::Skipped);
        }
        match self.store.update_job(&job, AnalysisStatus::Pending).await {
            Ok(()) => {}
            Err(StoreError::StatusConflict { .. }) | Err(StoreError::JobNotFound(_)) => {
                debug!(job_id = %job_id, "Lost claim race; skipping");
                return Ok(ExecutionOutcome::Skipped);
            }
            Err(err) => return Err(err),
        }

        // A missing problem record fails the job; a failing store fails
        // the worker.
        let analysis_result = match self.store.get_problem(job.problem_id()).await? {
            Some(problem) => self.run_analysis(&problem, &job).await,
            None => Err(format!("problem {} no longer exists", job.problem_id())),
        };

        let outcome = match analysis_result {
            Ok(outcome) => {
                if let Err(err) = job.complete(outcome) {
                    debug!(job_id = %job_id, error = %err, "Late completion ignored");
                    return Ok(ExecutionOutcome::Skipped);
                }
                ExecutionOutcome::Completed
            }
            Err(reason) => {
                warn!(job_id = %job_id, reason = %reason, "Analysis failed");
                if let Err(err) = job.fail(reason) {
                    debug!(job_id = %job_id, error = %err, "Late failure ignored");
                    return Ok(ExecutionOutcome::Skipped);
                }
                ExecutionOutcome::Failed
            }
        };
        self.finish(job, outcome).await
    }

    /// Composes the prompt, calls the provider once with a bounded timeout,
    /// and parses the completion. Every failure becomes a human-readable
    /// reason string terminating at the job boundary.
    async fn run_analysis(
        &self,
        problem: &Problem,
        job: &AnalysisJob,
    ) -> Result<AnalysisOutcome, String> {
        let options = job.options();
        let prompt = PromptComposer::compose(problem, options).map_err(|e| e.to_string())?;
        let provider = self
            .registry
            .resolve(&options.provider)
            .map_err(|e| e.to_string())?;

        let started = Instant::now();
        let completion: CompletionResult =
            match tokio::time::timeout(
                self.call_timeout,
                provider.complete(&prompt, options.model.as_deref()),
            )
            .await
            {
                Ok(Ok(completion)) => completion,
                Ok(Err(err)) => return Err(err.to_string()),
                Err(_elapsed) => {
                    return Err(
                        ProviderError::timeout(self.call_timeout.as_secs()).to_string()
                    )
                }
            };
        let processing_time_secs = started.elapsed().as_secs();

        info!(
            job_id = %job.id(),
            provider = %options.provider,
            model = %completion.model,
            tokens = ?completion.tokens_used,
            "Completion received"
        );

        Ok(AnalysisOutcome {
            report: AnalysisReport::from_raw(completion.content),
            provider: options.provider.clone(),
            model: completion.model,
            tokens_used: completion.tokens_used,
            processing_time_secs,
        })
    }

    /// Writes the terminal state conditionally on still holding the claim.
    async fn finish(
        &self,
        job: AnalysisJob,
        outcome: ExecutionOutcome,
    ) -> Result<ExecutionOutcome, StoreError> {
        match self.store.update_job(&job, AnalysisStatus::Processing).await {
            Ok(()) => Ok(outcome),
            Err(StoreError::StatusConflict { .. }) | Err(StoreError::JobNotFound(_)) => {
                debug!(job_id = %job.id(), "Job superseded before completion; dropping result");
                Ok(ExecutionOutcome::Skipped)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockFailure, MockProvider};
    use crate::adapters::storage::InMemoryProblemStore;
    use crate::domain::analysis::AnalysisOptions;
    use crate::domain::problem::Problem;

    const CALL_TIMEOUT: Duration = Duration::from_secs(5);

    async fn seeded(
        provider: MockProvider,
    ) -> (Arc<InMemoryProblemStore>, AnalysisExecutor, JobId) {
        let store = Arc::new(InMemoryProblemStore::new());
        let problem = Problem::new("Cache eviction", "Design an LRU cache", None, None).unwrap();
        store.create_problem(&problem).await.unwrap();

        let job = AnalysisJob::new(problem.id(), AnalysisOptions::for_provider("mock"));
        let job_id = job.id();
        store.create_job(&job).await.unwrap();

        let registry =
            Arc::new(ProviderRegistry::new().register("mock", Arc::new(provider)));
        let executor = AnalysisExecutor::new(store.clone(), registry, CALL_TIMEOUT);
        (store, executor, job_id)
    }

    #[tokio::test]
    async fn successful_run_completes_the_job() {
        let provider = MockProvider::new().with_response("### 1. EXISTING SOLUTIONS REVIEW\nLRU");
        let (store, executor, job_id) = seeded(provider).await;

        let outcome = executor.execute(job_id).await.unwrap();
        assert_eq!(outcome, ExecutionOutcome::Completed);

        let job = store.find_job(job_id).await.unwrap().unwrap();
        assert_eq!(job.status(), AnalysisStatus::Completed);
        let outcome = job.outcome().unwrap();
        assert!(outcome.report.raw_response.contains("LRU"));
        assert_eq!(outcome.provider, "mock");
        assert!(job.failure_reason().is_none());
    }

    #[tokio::test]
    async fn provider_error_fails_the_job_without_crashing() {
        let provider = MockProvider::new().with_failure(MockFailure::Unavailable {
            message: "credentials rejected".to_string(),
        });
        let (store, executor, job_id) = seeded(provider).await;

        let outcome = executor.execute(job_id).await.unwrap();
        assert_eq!(outcome, ExecutionOutcome::Failed);

        let job = store.find_job(job_id).await.unwrap().unwrap();
        assert_eq!(job.status(), AnalysisStatus::Failed);
        assert!(job
            .failure_reason()
            .unwrap()
            .contains("credentials rejected"));
        assert!(job.outcome().is_none());
    }

    #[tokio::test]
    async fn provider_timeout_records_timeout_reason() {
        let provider = MockProvider::new().with_failure(MockFailure::Timeout { timeout_secs: 120 });
        let (store, executor, job_id) = seeded(provider).await;

        let outcome = executor.execute(job_id).await.unwrap();
        assert_eq!(outcome, ExecutionOutcome::Failed);

        let job = store.find_job(job_id).await.unwrap().unwrap();
        assert!(job.failure_reason().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn slow_provider_is_bounded_by_executor_timeout() {
        let provider = MockProvider::new()
            .with_response("too late")
            .with_delay(Duration::from_millis(200));
        let store = Arc::new(InMemoryProblemStore::new());
        let problem = Problem::new("Title", "Description", None, None).unwrap();
        store.create_problem(&problem).await.unwrap();
        let job = AnalysisJob::new(problem.id(), AnalysisOptions::for_provider("mock"));
        let job_id = job.id();
        store.create_job(&job).await.unwrap();

        let registry =
            Arc::new(ProviderRegistry::new().register("mock", Arc::new(provider)));
        let executor =
            AnalysisExecutor::new(store.clone(), registry, Duration::from_millis(20));

        let outcome = executor.execute(job_id).await.unwrap();
        assert_eq!(outcome, ExecutionOutcome::Failed);

        let job = store.find_job(job_id).await.unwrap().unwrap();
        assert!(job.failure_reason().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn unknown_job_id_is_skipped() {
        let provider = MockProvider::new();
        let (_store, executor, _job_id) = seeded(provider).await;

        let outcome = executor.execute(JobId::new()).await.unwrap();
        assert_eq!(outcome, ExecutionOutcome::Skipped);
    }

    #[tokio::test]
    async fn duplicate_delivery_is_a_no_op() {
        let provider = MockProvider::new()
            .with_response("first delivery result")
            .with_response("second delivery result");
        let (store, executor, job_id) = seeded(provider).await;

        let first = executor.execute(job_id).await.unwrap();
        let second = executor.execute(job_id).await.unwrap();

        assert_eq!(first, ExecutionOutcome::Completed);
        assert_eq!(second, ExecutionOutcome::Skipped);

        let job = store.find_job(job_id).await.unwrap().unwrap();
        assert!(job
            .outcome()
            .unwrap()
            .report
            .raw_response
            .contains("first delivery"));
    }

    #[tokio::test]
    async fn concurrent_deliveries_claim_exactly_once() {
        let provider = MockProvider::new()
            .with_delay(Duration::from_millis(30))
            .with_response("winner")
            .with_response("loser");
        let (store, executor, job_id) = seeded(provider).await;
        let executor = Arc::new(executor);

        let a = tokio::spawn({
            let executor = executor.clone();
            async move { executor.execute(job_id).await.unwrap() }
        });
        let b = tokio::spawn({
            let executor = executor.clone();
            async move { executor.execute(job_id).await.unwrap() }
        });

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        let completed = [a, b]
            .iter()
            .filter(|o| **o == ExecutionOutcome::Completed)
            .count();
        assert_eq!(completed, 1, "exactly one delivery may complete the job");

        let job = store.find_job(job_id).await.unwrap().unwrap();
        assert_eq!(job.status(), AnalysisStatus::Completed);
    }

    #[tokio::test]
    async fn deleted_problem_fails_the_job() {
        let provider = MockProvider::new().with_response("unused");
        let store = Arc::new(InMemoryProblemStore::new());
        // Job references a problem that was never stored.
        let job = AnalysisJob::new(
            crate::domain::foundation::ProblemId::new(),
            AnalysisOptions::for_provider("mock"),
        );
        let job_id = job.id();
        store.create_job(&job).await.unwrap();

        let registry =
            Arc::new(ProviderRegistry::new().register("mock", Arc::new(provider)));
        let executor = AnalysisExecutor::new(store.clone(), registry, CALL_TIMEOUT);

        let outcome = executor.execute(job_id).await.unwrap();
        assert_eq!(outcome, ExecutionOutcome::Failed);

        let job = store.find_job(job_id).await.unwrap().unwrap();
        assert!(job.failure_reason().unwrap().contains("no longer exists"));
    }

    #[tokio::test]
    async fn unresolvable_provider_fails_the_job() {
        // Job snapshot names a provider the registry does not know.
        let provider = MockProvider::new();
        let store = Arc::new(InMemoryProblemStore::new());
        let problem = Problem::new("Title", "Description", None, None).unwrap();
        store.create_problem(&problem).await.unwrap();
        let job = AnalysisJob::new(problem.id(), AnalysisOptions::for_provider("vanished"));
        let job_id = job.id();
        store.create_job(&job).await.unwrap();

        let registry =
            Arc::new(ProviderRegistry::new().register("mock", Arc::new(provider)));
        let executor = AnalysisExecutor::new(store.clone(), registry, CALL_TIMEOUT);

        let outcome = executor.execute(job_id).await.unwrap();
        assert_eq!(outcome, ExecutionOutcome::Failed);

        let job = store.find_job(job_id).await.unwrap().unwrap();
        assert!(job.failure_reason().unwrap().contains("unknown provider"));
    }
}
