//! HTTP adapter for assessment endpoints.
//!
//! Exposes the assessment domain via REST API:
//! - `POST /api/assessments/entrepreneurial-dna/submit` - Submit answers
//! - `GET /api/assessments/entrepreneurial-dna/eligibility` - Retake eligibility
//! - `GET /api/assessments/entrepreneurial-dna/result` - Latest result
//! - `GET /api/assessments/entrepreneurial-dna/history` - Result history
//! - `GET /api/assessments/entrepreneurial-dna/subtypes/:slug` - Subtype profile
//! - `GET /health` - Liveness

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{AssessmentApiError, AssessmentAppState, AuthenticatedUser};
pub use routes::{app_router, assessment_routes};
