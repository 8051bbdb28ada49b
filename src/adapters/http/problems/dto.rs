//! HTTP DTOs (Data Transfer Objects) for problem endpoints.
//!
//! These types define the JSON request/response structure for the API.
//! They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::application::{JobHandle, JobStatusView};
use crate::domain::analysis::{AnalysisOutcome, AnalysisStatus};
use crate::domain::problem::Problem;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to submit a new problem.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProblemRequest {
    /// Problem title.
    pub title: String,
    /// Detailed problem description.
    pub description: String,
    /// Additional background information.
    #[serde(default)]
    pub background: Option<String>,
    /// Contact email for notifications.
    #[serde(default)]
    pub contact_email: Option<String>,
}

/// Request to update an existing problem's non-analysis fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProblemRequest {
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
}

/// Request to trigger analysis of a problem.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    /// Provider to use; the registry default when absent.
    #[serde(default)]
    pub provider: Option<String>,
    /// Provider-specific model override.
    #[serde(default)]
    pub model: Option<String>,
    /// Include hardware considerations in the analysis.
    #[serde(default = "default_include_hardware")]
    pub include_hardware_analysis: bool,
    /// Custom analysis requirements appended to the prompt.
    #[serde(default)]
    pub custom_requirements: Option<String>,
    /// Supersede an in-flight or terminal job with a fresh cycle.
    #[serde(default)]
    pub force_retry: bool,
}

fn default_include_hardware() -> bool {
    true
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for problem details.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub background: Option<String>,
    pub contact_email: Option<String>,
    /// When the problem was created (ISO 8601).
    pub created_at: String,
    /// When the problem was last updated (ISO 8601).
    pub updated_at: String,
}

impl From<Problem> for ProblemResponse {
    fn from(problem: Problem) -> Self {
        Self {
            id: problem.id().to_string(),
            title: problem.title().to_string(),
            description: problem.description().to_string(),
            background: problem.background().map(str::to_string),
            contact_email: problem.contact_email().map(str::to_string),
            created_at: problem.created_at().to_rfc3339(),
            updated_at: problem.updated_at().to_rfc3339(),
        }
    }
}

/// Response when an analysis request is accepted.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub job_id: String,
    pub problem_id: String,
    pub status: AnalysisStatus,
    pub message: String,
}

impl From<JobHandle> for AnalyzeResponse {
    fn from(handle: JobHandle) -> Self {
        Self {
            job_id: handle.job_id.to_string(),
            problem_id: handle.problem_id.to_string(),
            status: handle.status,
            message: "Analysis started".to_string(),
        }
    }
}

/// Response for the analysis read path.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisStatusResponse {
    pub job_id: String,
    pub problem_id: String,
    pub status: AnalysisStatus,
    pub result: Option<AnalysisOutcome>,
    pub failure_reason: Option<String>,
    pub updated_at: String,
}

impl From<JobStatusView> for AnalysisStatusResponse {
    fn from(view: JobStatusView) -> Self {
        Self {
            job_id: view.job_id.to_string(),
            problem_id: view.problem_id.to_string(),
            status: view.status,
            result: view.outcome,
            failure_reason: view.failure_reason,
            updated_at: view.updated_at,
        }
    }
}

/// Response listing available providers.
#[derive(Debug, Clone, Serialize)]
pub struct ProvidersResponse {
    pub providers: Vec<String>,
    pub default: Option<String>,
    pub total: usize,
}

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
