//! HTTP DTOs (Data Transfer Objects) for assessment endpoints.
//!
//! These types define the JSON request/response structure for the assessment API.
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::SubmitAssessmentResult;
use crate::domain::assessment::{
    ClassificationResult, DnaType, Eligibility, SubtypeCategory, SubtypeProfile,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to submit a completed questionnaire.
///
/// `responses` is kept as raw JSON so that a missing or non-array value can be
/// told apart from a malformed array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitAssessmentRequest {
    #[serde(default)]
    pub responses: Option<Value>,
}

impl SubmitAssessmentRequest {
    /// Raw labels in question order, or `None` if `responses` is not an array.
    ///
    /// Elements may be bare labels (`"A"`) or `{"questionId": n, "answer": "A"}`
    /// objects. Anything else is kept as its JSON text so that label
    /// validation reports it at its index.
    pub fn into_labels(self) -> Option<Vec<String>> {
        match self.responses? {
            Value::Array(items) => Some(items.into_iter().map(element_label).collect()),
            _ => None,
        }
    }
}

fn element_label(item: Value) -> String {
    match item {
        Value::String(label) => label,
        Value::Object(mut fields) => match fields.remove("answer") {
            Some(Value::String(label)) => label,
            Some(other) => other.to_string(),
            None => Value::Object(fields).to_string(),
        },
        other => other.to_string(),
    }
}

/// Query parameters for the history endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryParams {
    #[serde(default)]
    pub limit: Option<usize>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a successful submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssessmentResponse {
    pub id: String,
    pub dominant_type: DnaType,
    pub awareness_percentage: u8,
    pub architect_score: u8,
    pub alchemist_score: u8,
    pub subtype: String,
    /// Always false right after a submission.
    pub can_retake: bool,
    /// ISO 8601.
    pub next_retake_date: String,
}

impl From<SubmitAssessmentResult> for SubmitAssessmentResponse {
    fn from(outcome: SubmitAssessmentResult) -> Self {
        let result = outcome.result;
        Self {
            id: result.id.to_string(),
            dominant_type: result.dominant_type,
            awareness_percentage: result.awareness_percentage.value(),
            architect_score: result.architect_score,
            alchemist_score: result.alchemist_score,
            subtype: result.subtype.to_string(),
            can_retake: false,
            next_retake_date: outcome.next_retake_date.to_rfc3339(),
        }
    }
}

/// Response for the eligibility check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResponse {
    pub can_retake: bool,
    /// ISO 8601, null when the user can retake now.
    pub next_retake_date: Option<String>,
    /// ISO 8601, null for a user who never took the assessment.
    pub last_taken_at: Option<String>,
}

impl From<Eligibility> for EligibilityResponse {
    fn from(eligibility: Eligibility) -> Self {
        Self {
            can_retake: eligibility.can_retake,
            next_retake_date: eligibility.next_retake_date.map(|t| t.to_rfc3339()),
            last_taken_at: eligibility.last_taken_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// One stored classification.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultResponse {
    pub id: String,
    pub dominant_type: DnaType,
    pub awareness_percentage: u8,
    pub architect_score: u8,
    pub alchemist_score: u8,
    pub subtype: String,
    /// ISO 8601.
    pub created_at: String,
}

impl From<ClassificationResult> for ResultResponse {
    fn from(result: ClassificationResult) -> Self {
        Self {
            id: result.id.to_string(),
            dominant_type: result.dominant_type,
            awareness_percentage: result.awareness_percentage.value(),
            architect_score: result.architect_score,
            alchemist_score: result.alchemist_score,
            subtype: result.subtype.to_string(),
            created_at: result.created_at.to_rfc3339(),
        }
    }
}

/// Response for the history endpoint, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub results: Vec<ResultResponse>,
}

/// Display copy for one subtype.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtypeProfileResponse {
    pub slug: String,
    pub name: String,
    pub category: SubtypeCategory,
    pub operating_loop: String,
    pub core_identity: String,
    pub opposite_awareness: String,
    pub edge: String,
    pub risks: String,
    pub next_steps: String,
}

impl From<&SubtypeProfile> for SubtypeProfileResponse {
    fn from(profile: &SubtypeProfile) -> Self {
        Self {
            slug: profile.slug.to_string(),
            name: profile.name.to_string(),
            category: profile.category,
            operating_loop: profile.operating_loop.to_string(),
            core_identity: profile.core_identity.to_string(),
            opposite_awareness: profile.opposite_awareness.to_string(),
            edge: profile.edge.to_string(),
            risks: profile.risks.to_string(),
            next_steps: profile.next_steps.to_string(),
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create an error response with details.
    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}
