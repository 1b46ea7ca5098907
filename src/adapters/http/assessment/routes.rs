//! Axum router configuration for assessment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    check_eligibility, get_latest_result, get_result_history, get_subtype_profile, health,
    submit_assessment, AssessmentAppState,
};

/// Create the assessment API router.
///
/// # Routes
///
/// ## User Endpoints (require `X-User-Id`)
/// - `POST /submit` - Submit a completed questionnaire
/// - `GET /eligibility` - Check retake eligibility
/// - `GET /result` - Latest classification
/// - `GET /history` - Every classification, newest first
///
/// ## Public Endpoints
/// - `GET /subtypes/:slug` - Subtype display copy
pub fn assessment_routes() -> Router<AssessmentAppState> {
    Router::new()
        .route("/submit", post(submit_assessment))
        .route("/eligibility", get(check_eligibility))
        .route("/result", get(get_latest_result))
        .route("/history", get(get_result_history))
        .route("/subtypes/:slug", get(get_subtype_profile))
}

/// Create the complete application router.
///
/// Mounts the assessment routes at `/api/assessments/entrepreneurial-dna` and
/// the liveness probe at `/health`.
///
/// # Example
///
/// ```ignore
/// let state = AssessmentAppState::new(service);
/// let app = app_router(state).layer(TraceLayer::new_for_http());
/// axum::serve(listener, app).await?;
/// ```
pub fn app_router(state: AssessmentAppState) -> Router {
    Router::new()
        .nest("/api/assessments/entrepreneurial-dna", assessment_routes())
        .route("/health", get(health))
        .with_state(state)
}
