//! HTTP handlers for assessment endpoints.
//!
//! These handlers connect Axum routes to the application layer handlers.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Json, Path, Query, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};
use tracing::error;

use crate::application::{
    AssessmentService, CheckEligibilityQuery, GetLatestResultQuery, GetResultHistoryQuery,
    GetSubtypeProfileQuery, SubmitAssessmentCommand,
};
use crate::domain::assessment::AssessmentError;
use crate::domain::foundation::UserId;

use super::dto::{
    EligibilityResponse, ErrorResponse, HealthResponse, HistoryParams, HistoryResponse,
    ResultResponse, SubmitAssessmentRequest, SubmitAssessmentResponse, SubtypeProfileResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state.
///
/// Cloned for each request; the service is shared behind an `Arc`.
#[derive(Clone)]
pub struct AssessmentAppState {
    pub service: Arc<AssessmentService>,
}

impl AssessmentAppState {
    pub fn new(service: AssessmentService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// User Context (would come from auth middleware in production)
// ════════════════════════════════════════════════════════════════════════════════

/// Authenticated user context extracted from request.
///
/// The identity provider sits in front of this service and forwards the
/// user id in the `X-User-Id` header. The id is trusted as opaque.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Rejection type for AuthenticatedUser extraction.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> Response {
        let error = ErrorResponse::new("AUTHENTICATION_REQUIRED", "Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("X-User-Id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| UserId::new(s).ok())
            .ok_or(AuthenticationRequired)?;

        Ok(AuthenticatedUser { user_id })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/assessments/entrepreneurial-dna/eligibility
pub async fn check_eligibility(
    State(state): State<AssessmentAppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AssessmentApiError> {
    let query = CheckEligibilityQuery {
        user_id: user.user_id,
    };

    let eligibility = state.service.check_eligibility(query).await?;

    Ok(Json(EligibilityResponse::from(eligibility)))
}

/// GET /api/assessments/entrepreneurial-dna/result
pub async fn get_latest_result(
    State(state): State<AssessmentAppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AssessmentApiError> {
    let query = GetLatestResultQuery {
        user_id: user.user_id,
    };

    let result = state.service.get_latest_result(query).await?;

    Ok(Json(ResultResponse::from(result)))
}

/// GET /api/assessments/entrepreneurial-dna/history?limit=n
pub async fn get_result_history(
    State(state): State<AssessmentAppState>,
    user: AuthenticatedUser,
    Query(params): Query<HistoryParams>,
) -> Result<impl IntoResponse, AssessmentApiError> {
    let query = GetResultHistoryQuery {
        user_id: user.user_id,
        limit: params.limit,
    };

    let history = state.service.get_result_history(query).await?;

    let response = HistoryResponse {
        results: history.into_iter().map(ResultResponse::from).collect(),
    };
    Ok(Json(response))
}

/// GET /api/assessments/entrepreneurial-dna/subtypes/:slug
pub async fn get_subtype_profile(
    State(state): State<AssessmentAppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AssessmentApiError> {
    let profile = state
        .service
        .get_subtype_profile(GetSubtypeProfileQuery { slug })?;

    Ok(Json(SubtypeProfileResponse::from(profile)))
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/assessments/entrepreneurial-dna/submit
///
/// A body that is not a JSON object is treated like one without `responses`.
pub async fn submit_assessment(
    State(state): State<AssessmentAppState>,
    user: AuthenticatedUser,
    body: Option<Json<SubmitAssessmentRequest>>,
) -> Result<impl IntoResponse, AssessmentApiError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let cmd = SubmitAssessmentCommand {
        user_id: user.user_id,
        responses: request.into_labels(),
    };

    let outcome = state.service.submit(cmd).await?;

    Ok((StatusCode::CREATED, Json(SubmitAssessmentResponse::from(outcome))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper that converts assessment errors to HTTP responses.
#[derive(Debug)]
pub struct AssessmentApiError(AssessmentError);

impl From<AssessmentError> for AssessmentApiError {
    fn from(err: AssessmentError) -> Self {
        Self(err)
    }
}

impl AssessmentApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AssessmentError::MissingInput => StatusCode::BAD_REQUEST,
            AssessmentError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AssessmentError::RetakeNotAllowed { .. } => StatusCode::CONFLICT,
            AssessmentError::NotFound(_) | AssessmentError::SubtypeNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AssessmentError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AssessmentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AssessmentApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AssessmentError::Internal(message) = &self.0 {
            error!(error = %message, "Assessment request failed");
        }

        let error_code = self.0.code().to_string();
        let message = self.0.message();
        let details = self.0.details();
        let body = if details.is_empty() {
            ErrorResponse::new(error_code, message)
        } else {
            let fields: Map<String, Value> = details
                .into_iter()
                .map(|(key, value)| (key.to_string(), Value::String(value)))
                .collect();
            ErrorResponse::with_details(error_code, message, Value::Object(fields))
        };
        (status, Json(body)).into_response()
    }
}
