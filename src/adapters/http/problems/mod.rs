//! HTTP endpoints for problems and their analyses.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AnalysisStatusResponse, AnalyzeRequest, AnalyzeResponse, CreateProblemRequest, ErrorResponse,
    ProblemResponse, ProvidersResponse, UpdateProblemRequest,
};
pub use handlers::ProblemsAppState;
pub use routes::problems_router;
