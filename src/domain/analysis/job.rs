//! Analysis job - one attempt to produce an AI analysis for a problem.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::{AnalysisOptions, AnalysisReport, AnalysisStatus};
use crate::domain::foundation::{DomainError, JobId, ProblemId, StateMachine, Timestamp};

/// The payload recorded on a successfully completed job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    /// Parsed analysis report.
    pub report: AnalysisReport,
    /// Provider that produced the completion.
    pub provider: String,
    /// Model that produced the completion.
    pub model: String,
    /// Total tokens consumed, when the provider reports them.
    pub tokens_used: Option<u32>,
    /// Wall-clock seconds spent in the provider call.
    pub processing_time_secs: u64,
}

/// One analysis job cycle for a problem.
///
/// The options snapshot is captured at construction and never mutated.
/// Status only changes through [`claim`](Self::claim),
/// [`complete`](Self::complete) and [`fail`](Self::fail), which enforce the
/// state machine rules and keep the outcome and failure reason mutually
/// exclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisJob {
    id: JobId,
    problem_id: ProblemId,
    options: AnalysisOptions,
    status: AnalysisStatus,
    outcome: Option<AnalysisOutcome>,
    failure_reason: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl AnalysisJob {
    /// Creates a new pending job with a snapshot of the given options.
    pub fn new(problem_id: ProblemId, options: AnalysisOptions) -> Self {
        let now = Timestamp::now();
        Self {
            id: JobId::new(),
            problem_id,
            options,
            status: AnalysisStatus::Pending,
            outcome: None,
            failure_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn problem_id(&self) -> ProblemId {
        self.problem_id
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    pub fn outcome(&self) -> Option<&AnalysisOutcome> {
        self.outcome.as_ref()
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Whether the job has reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Claims the job for execution (Pending -> Processing).
    pub fn claim(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(AnalysisStatus::Processing)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Records a successful outcome (Processing -> Completed).
    pub fn complete(&mut self, outcome: AnalysisOutcome) -> Result<(), DomainError> {
        self.status = self.status.transition_to(AnalysisStatus::Completed)?;
        self.outcome = Some(outcome);
        self.failure_reason = None;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Records a failure (Processing -> Failed).
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), DomainError> {
        self.status = self.status.transition_to(AnalysisStatus::Failed)?;
        self.failure_reason = Some(reason.into());
        self.outcome = None;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn test_outcome() -> AnalysisOutcome {
        AnalysisOutcome {
            report: AnalysisReport::from_raw("## Analysis\nresult text"),
            provider: "mock".to_string(),
            model: "mock-model-1".to_string(),
            tokens_used: Some(128),
            processing_time_secs: 2,
        }
    }

    fn test_job() -> AnalysisJob {
        AnalysisJob::new(ProblemId::new(), AnalysisOptions::for_provider("mock"))
    }

    #[test]
    fn new_job_starts_pending() {
        let job = test_job();
        assert_eq!(job.status(), AnalysisStatus::Pending);
        assert!(job.outcome().is_none());
        assert!(job.failure_reason().is_none());
    }

    #[test]
    fn claim_moves_pending_to_processing() {
        let mut job = test_job();
        job.claim().unwrap();
        assert_eq!(job.status(), AnalysisStatus::Processing);
    }

    #[test]
    fn double_claim_is_rejected_without_mutation() {
        let mut job = test_job();
        job.claim().unwrap();

        let err = job.claim().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(job.status(), AnalysisStatus::Processing);
    }

    #[test]
    fn complete_attaches_outcome() {
        let mut job = test_job();
        job.claim().unwrap();
        job.complete(test_outcome()).unwrap();

        assert_eq!(job.status(), AnalysisStatus::Completed);
        assert!(job.outcome().is_some());
        assert!(job.failure_reason().is_none());
        assert!(job.is_terminal());
    }

    #[test]
    fn fail_attaches_reason() {
        let mut job = test_job();
        job.claim().unwrap();
        job.fail("provider timed out after 120s").unwrap();

        assert_eq!(job.status(), AnalysisStatus::Failed);
        assert_eq!(job.failure_reason(), Some("provider timed out after 120s"));
        assert!(job.outcome().is_none());
    }

    #[test]
    fn complete_without_claim_is_rejected() {
        let mut job = test_job();
        let err = job.complete(test_outcome()).unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(job.status(), AnalysisStatus::Pending);
        assert!(job.outcome().is_none());
    }

    #[test]
    fn terminal_job_rejects_late_callbacks() {
        let mut job = test_job();
        job.claim().unwrap();
        job.complete(test_outcome()).unwrap();

        assert!(job.fail("late failure").is_err());
        assert_eq!(job.status(), AnalysisStatus::Completed);
        assert!(job.failure_reason().is_none());
    }

    #[test]
    fn options_snapshot_is_preserved() {
        let options = AnalysisOptions::for_provider("anthropic")
            .with_model("claude-sonnet-4-20250514")
            .with_hardware_analysis(false);
        let job = AnalysisJob::new(ProblemId::new(), options.clone());

        assert_eq!(job.options(), &options);
    }
}
