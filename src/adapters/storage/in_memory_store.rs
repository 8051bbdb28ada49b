//! In-memory implementation of the ProblemStore port.
//!
//! Backs development and tests; a database adapter would implement the
//! same port for production. The job map holds the current cycle per
//! problem, so superseding a job makes its old id unresolvable, which is
//! the signal stale executor callbacks key off.
//!
//! All check-then-set logic runs under a single write lock, making
//! `update_job` atomic as the port requires.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::analysis::{AnalysisJob, AnalysisStatus};
use crate::domain::foundation::{JobId, ProblemId};
use crate::domain::problem::Problem;
use crate::ports::{ProblemStore, StoreError};

/// In-memory problem and job storage.
pub struct InMemoryProblemStore {
    problems: RwLock<HashMap<ProblemId, Problem>>,
    // Current job cycle per problem; superseded cycles are dropped.
    jobs: RwLock<HashMap<ProblemId, AnalysisJob>>,
}

impl InMemoryProblemStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            problems: RwLock::new(HashMap::new()),
            jobs: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryProblemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProblemStore for InMemoryProblemStore {
    async fn create_problem(&self, problem: &Problem) -> Result<(), StoreError> {
        self.problems
            .write()
            .expect("InMemoryProblemStore: problems lock poisoned")
            .insert(problem.id(), problem.clone());
        Ok(())
    }

    async fn get_problem(&self, id: ProblemId) -> Result<Option<Problem>, StoreError> {
        Ok(self
            .problems
            .read()
            .expect("InMemoryProblemStore: problems lock poisoned")
            .get(&id)
            .cloned())
    }

    async fn list_problems(&self) -> Result<Vec<Problem>, StoreError> {
        let mut problems: Vec<Problem> = self
            .problems
            .read()
            .expect("InMemoryProblemStore: problems lock poisoned")
            .values()
            .cloned()
            .collect();
        problems.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(problems)
    }

    async fn update_problem(&self, problem: &Problem) -> Result<(), StoreError> {
        self.problems
            .write()
            .expect("InMemoryProblemStore: problems lock poisoned")
            .insert(problem.id(), problem.clone());
        Ok(())
    }

    async fn create_job(&self, job: &AnalysisJob) -> Result<(), StoreError> {
        self.jobs
            .write()
            .expect("InMemoryProblemStore: jobs lock poisoned")
            .insert(job.problem_id(), job.clone());
        Ok(())
    }

    async fn find_job(&self, id: JobId) -> Result<Option<AnalysisJob>, StoreError> {
        Ok(self
            .jobs
            .read()
            .expect("InMemoryProblemStore: jobs lock poisoned")
            .values()
            .find(|job| job.id() == id)
            .cloned())
    }

    async fn find_job_by_problem(
        &self,
        problem_id: ProblemId,
    ) -> Result<Option<AnalysisJob>, StoreError> {
        Ok(self
            .jobs
            .read()
            .expect("InMemoryProblemStore: jobs lock poisoned")
            .get(&problem_id)
            .cloned())
    }

    async fn update_job(
        &self,
        job: &AnalysisJob,
        expected_prior_status: AnalysisStatus,
    ) -> Result<(), StoreError> {
        let mut jobs = self
            .jobs
            .write()
            .expect("InMemoryProblemStore: jobs lock poisoned");

        let stored = jobs
            .get(&job.problem_id())
            .filter(|stored| stored.id() == job.id())
            .ok_or(StoreError::JobNotFound(job.id()))?;

        if stored.status() != expected_prior_status {
            return Err(StoreError::StatusConflict {
                job_id: job.id(),
                expected: expected_prior_status,
                actual: stored.status(),
            });
        }

        jobs.insert(job.problem_id(), job.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::AnalysisOptions;

    async fn seeded_job(store: &InMemoryProblemStore) -> AnalysisJob {
        let job = AnalysisJob::new(ProblemId::new(), AnalysisOptions::for_provider("mock"));
        store.create_job(&job).await.unwrap();
        job
    }

    #[tokio::test]
    async fn problems_roundtrip() {
        let store = InMemoryProblemStore::new();
        let problem = Problem::new("Title", "Description", None, None).unwrap();

        store.create_problem(&problem).await.unwrap();
        let fetched = store.get_problem(problem.id()).await.unwrap().unwrap();
        assert_eq!(fetched.title(), "Title");
    }

    #[tokio::test]
    async fn list_problems_is_newest_first() {
        let store = InMemoryProblemStore::new();
        let first = Problem::new("First", "Description", None, None).unwrap();
        store.create_problem(&first).await.unwrap();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let second = Problem::new("Second", "Description", None, None).unwrap();
        store.create_problem(&second).await.unwrap();

        let listed = store.list_problems().await.unwrap();
        assert_eq!(listed[0].title(), "Second");
        assert_eq!(listed[1].title(), "First");
    }

    #[tokio::test]
    async fn conditional_update_succeeds_on_matching_status() {
        let store = InMemoryProblemStore::new();
        let mut job = seeded_job(&store).await;

        job.claim().unwrap();
        store
            .update_job(&job, AnalysisStatus::Pending)
            .await
            .unwrap();

        let stored = store.find_job(job.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), AnalysisStatus::Processing);
    }

    #[tokio::test]
    async fn conditional_update_rejects_stale_expectation() {
        let store = InMemoryProblemStore::new();
        let mut job = seeded_job(&store).await;

        job.claim().unwrap();
        store
            .update_job(&job, AnalysisStatus::Pending)
            .await
            .unwrap();

        // A second writer still expecting Pending must lose.
        let err = store
            .update_job(&job, AnalysisStatus::Pending)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::StatusConflict { .. }));
    }

    #[tokio::test]
    async fn superseded_job_id_becomes_unresolvable() {
        let store = InMemoryProblemStore::new();
        let problem_id = ProblemId::new();
        let old = AnalysisJob::new(problem_id, AnalysisOptions::for_provider("mock"));
        store.create_job(&old).await.unwrap();

        let new = AnalysisJob::new(problem_id, AnalysisOptions::for_provider("mock"));
        store.create_job(&new).await.unwrap();

        assert!(store.find_job(old.id()).await.unwrap().is_none());
        assert_eq!(
            store.find_job_by_problem(problem_id).await.unwrap().unwrap().id(),
            new.id()
        );
    }

    #[tokio::test]
    async fn updating_a_superseded_job_reports_not_found() {
        let store = InMemoryProblemStore::new();
        let problem_id = ProblemId::new();
        let mut old = AnalysisJob::new(problem_id, AnalysisOptions::for_provider("mock"));
        store.create_job(&old).await.unwrap();
        store
            .create_job(&AnalysisJob::new(
                problem_id,
                AnalysisOptions::for_provider("mock"),
            ))
            .await
            .unwrap();

        old.claim().unwrap();
        let err = store
            .update_job(&old, AnalysisStatus::Pending)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::JobNotFound(_)));
    }
}
