//! Problem Store Port - key-addressed storage for problems and jobs.
//!
//! The orchestration core consumes storage through this contract only.
//! `update_job` is conditional on the previously stored status; the store
//! must apply the check-then-set atomically, which is what upholds the
//! at-most-one-claim guarantee when executors race.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::analysis::{AnalysisJob, AnalysisStatus};
use crate::domain::foundation::{JobId, ProblemId};
use crate::domain::problem::Problem;

/// Port for problem and analysis job persistence.
#[async_trait]
pub trait ProblemStore: Send + Sync {
    /// Persist a new problem.
    async fn create_problem(&self, problem: &Problem) -> Result<(), StoreError>;

    /// Fetch a problem by id.
    async fn get_problem(&self, id: ProblemId) -> Result<Option<Problem>, StoreError>;

    /// List problems, newest first.
    async fn list_problems(&self) -> Result<Vec<Problem>, StoreError>;

    /// Replace a stored problem (non-analysis field updates).
    async fn update_problem(&self, problem: &Problem) -> Result<(), StoreError>;

    /// Persist a new job cycle.
    ///
    /// Replaces any prior job for the same problem; the caller is
    /// responsible for only superseding terminal jobs (or deliberately
    /// overriding an in-flight one on an explicit retry).
    async fn create_job(&self, job: &AnalysisJob) -> Result<(), StoreError>;

    /// Fetch a job by its id.
    ///
    /// Returns `None` for unknown ids, including ids superseded by a newer
    /// job cycle for the same problem.
    async fn find_job(&self, id: JobId) -> Result<Option<AnalysisJob>, StoreError>;

    /// Fetch the current job cycle for a problem.
    async fn find_job_by_problem(
        &self,
        problem_id: ProblemId,
    ) -> Result<Option<AnalysisJob>, StoreError>;

    /// Conditionally replace a stored job.
    ///
    /// Succeeds only when the stored job has the same id and its status
    /// equals `expected_prior_status`; fails with
    /// [`StoreError::StatusConflict`] otherwise. Implementations must make
    /// the check and the write a single atomic step.
    async fn update_job(
        &self,
        job: &AnalysisJob,
        expected_prior_status: AnalysisStatus,
    ) -> Result<(), StoreError>;
}

/// Storage errors.
///
/// `StatusConflict` is an expected outcome of racing executors; the other
/// variants are infrastructure failures.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Conditional update lost: the stored status did not match.
    #[error("job {job_id} status conflict: expected {expected}, found {actual}")]
    StatusConflict {
        job_id: JobId,
        expected: AnalysisStatus,
        actual: AnalysisStatus,
    },

    /// The job being updated no longer exists (superseded or never stored).
    #[error("job {0} not found")]
    JobNotFound(JobId),

    /// The backing store failed.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that the trait is object-safe
    #[allow(dead_code)]
    fn assert_store_object_safe(_: &dyn ProblemStore) {}

    #[test]
    fn status_conflict_display_names_both_statuses() {
        let err = StoreError::StatusConflict {
            job_id: JobId::new(),
            expected: AnalysisStatus::Pending,
            actual: AnalysisStatus::Processing,
        };
        let text = err.to_string();
        assert!(text.contains("expected pending"));
        assert!(text.contains("found processing"));
    }
}
