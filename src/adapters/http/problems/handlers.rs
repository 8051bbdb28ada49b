//! HTTP handlers for problem endpoints.
//!
//! These handlers connect Axum routes to the dispatcher and the store.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{
    AnalysisDispatcher, JobStatusError, ProviderRegistry, RequestAnalysisError,
};
use crate::domain::analysis::AnalysisOptions;
use crate::domain::foundation::{DomainError, ProblemId};
use crate::domain::problem::Problem;
use crate::ports::{ProblemStore, StoreError};

use super::dto::{
    AnalysisStatusResponse, AnalyzeRequest, AnalyzeResponse, CreateProblemRequest, ErrorResponse,
    ProblemResponse, ProvidersResponse, UpdateProblemRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct ProblemsAppState {
    pub store: Arc<dyn ProblemStore>,
    pub dispatcher: Arc<AnalysisDispatcher>,
    pub registry: Arc<ProviderRegistry>,
}

impl ProblemsAppState {
    pub fn new(
        store: Arc<dyn ProblemStore>,
        dispatcher: Arc<AnalysisDispatcher>,
        registry: Arc<ProviderRegistry>,
    ) -> Self {
        Self {
            store,
            dispatcher,
            registry,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Problem CRUD
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/problems - Submit a new problem
pub async fn create_problem(
    State(state): State<ProblemsAppState>,
    Json(request): Json<CreateProblemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let problem = Problem::new(
        request.title,
        request.description,
        request.background,
        request.contact_email,
    )?;

    state.store.create_problem(&problem).await?;

    Ok((StatusCode::CREATED, Json(ProblemResponse::from(problem))))
}

/// GET /api/problems - List problems, newest first
pub async fn list_problems(
    State(state): State<ProblemsAppState>,
) -> Result<impl IntoResponse, ApiError> {
    let problems = state.store.list_problems().await?;
    let response: Vec<ProblemResponse> =
        problems.into_iter().map(ProblemResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/problems/:id - Fetch a problem
pub async fn get_problem(
    State(state): State<ProblemsAppState>,
    Path(problem_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let problem_id = parse_problem_id(&problem_id)?;
    let problem = state
        .store
        .get_problem(problem_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Problem not found: {}", problem_id)))?;

    Ok(Json(ProblemResponse::from(problem)))
}

/// PUT /api/problems/:id - Update non-analysis fields
pub async fn update_problem(
    State(state): State<ProblemsAppState>,
    Path(problem_id): Path<String>,
    Json(request): Json<UpdateProblemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let problem_id = parse_problem_id(&problem_id)?;
    let mut problem = state
        .store
        .get_problem(problem_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Problem not found: {}", problem_id)))?;

    if request.background.is_some() {
        problem.set_background(request.background);
    }
    if request.contact_email.is_some() {
        problem.set_contact_email(request.contact_email);
    }

    state.store.update_problem(&problem).await?;

    Ok(Json(ProblemResponse::from(problem)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Analysis
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/problems/:id/analyze - Trigger analysis
pub async fn analyze_problem(
    State(state): State<ProblemsAppState>,
    Path(problem_id): Path<String>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let problem_id = parse_problem_id(&problem_id)?;

    let provider = match request.provider {
        Some(provider) => provider,
        None => state
            .registry
            .default_provider()
            .ok_or(ApiError::ServiceUnavailable(
                "No AI providers available. Please configure API keys.".to_string(),
            ))?
            .to_string(),
    };

    let options = AnalysisOptions {
        provider,
        model: request.model,
        include_hardware_analysis: request.include_hardware_analysis,
        custom_requirements: request.custom_requirements,
    };

    let handle = state
        .dispatcher
        .request_analysis(problem_id, options, request.force_retry)
        .await?;

    Ok((StatusCode::ACCEPTED, Json(AnalyzeResponse::from(handle))))
}

/// GET /api/problems/:id/analysis - Analysis status and result
pub async fn get_analysis(
    State(state): State<ProblemsAppState>,
    Path(problem_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let problem_id = parse_problem_id(&problem_id)?;
    let view = state.dispatcher.get_job_status(problem_id).await?;
    Ok(Json(AnalysisStatusResponse::from(view)))
}

/// GET /api/providers - Available providers
pub async fn get_providers(
    State(state): State<ProblemsAppState>,
) -> Result<impl IntoResponse, ApiError> {
    let providers = state.registry.available_providers();
    let response = ProvidersResponse {
        total: providers.len(),
        default: state.registry.default_provider().map(str::to_string),
        providers,
    };
    Ok(Json(response))
}

fn parse_problem_id(raw: &str) -> Result<ProblemId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid problem ID format".to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<RequestAnalysisError> for ApiError {
    fn from(err: RequestAnalysisError) -> Self {
        match err {
            RequestAnalysisError::ProblemNotFound(_) => ApiError::NotFound(err.to_string()),
            RequestAnalysisError::InvalidProblem(_) => ApiError::BadRequest(err.to_string()),
            RequestAnalysisError::UnknownProvider(_) => ApiError::BadRequest(err.to_string()),
            RequestAnalysisError::NoProviderAvailable => {
                ApiError::ServiceUnavailable(err.to_string())
            }
            RequestAnalysisError::AnalysisAlreadyInProgress { .. } => {
                ApiError::Conflict(err.to_string())
            }
            RequestAnalysisError::Store(_) | RequestAnalysisError::Queue(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<JobStatusError> for ApiError {
    fn from(err: JobStatusError) -> Self {
        match err {
            JobStatusError::ProblemNotFound(_) => ApiError::NotFound(err.to_string()),
            JobStatusError::NoAnalysisRequested(_) => ApiError::NotFound(err.to_string()),
            JobStatusError::Store(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
