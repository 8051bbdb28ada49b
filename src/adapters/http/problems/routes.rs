//! Route configuration for problem endpoints.
//!
//! Configures the Axum router with problem and analysis routes.

use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{
    analyze_problem, create_problem, get_analysis, get_problem, get_providers, list_problems,
    update_problem, ProblemsAppState,
};

/// Creates the problems router with all endpoints.
///
/// Routes:
/// - `POST /api/problems` - Submit a problem
/// - `GET /api/problems` - List problems
/// - `GET /api/problems/:id` - Fetch a problem
/// - `PUT /api/problems/:id` - Update non-analysis fields
/// - `POST /api/problems/:id/analyze` - Trigger AI analysis
/// - `GET /api/problems/:id/analysis` - Analysis status and result
/// - `GET /api/providers` - Available AI providers
pub fn problems_router() -> Router<ProblemsAppState> {
    Router::new()
        .route("/api/problems", post(create_problem).get(list_problems))
        .route("/api/problems/:id", get(get_problem).put(update_problem))
        .route("/api/problems/:id/analyze", post(analyze_problem))
        .route("/api/problems/:id/analysis", get(get_analysis))
        .route("/api/providers", get(get_providers))
}
