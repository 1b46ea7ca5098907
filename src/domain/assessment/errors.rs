//! Assessment error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | MissingInput | 400 |
//! | InvalidInput | 422 |
//! | RetakeNotAllowed | 409 |
//! | NotFound | 404 |
//! | SubtypeNotFound | 404 |
//! | StoreUnavailable | 503 |
//! | Internal | 500 |

use thiserror::Error;

use super::answer::AnswerSetError;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};

/// Errors surfaced by assessment operations.
///
/// All variants except `StoreUnavailable` and `Internal` are expected,
/// caller-facing outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// Responses were absent or not a list.
    #[error("Responses are required and must be an array")]
    MissingInput,

    /// Responses were present but malformed.
    #[error("Invalid responses: {0}")]
    InvalidInput(#[from] AnswerSetError),

    /// The cooldown window has not elapsed.
    #[error("You can retake the assessment after {next_retake_date}")]
    RetakeNotAllowed { next_retake_date: Timestamp },

    /// The user has not taken the assessment yet.
    #[error("No assessment results found for user {0}")]
    NotFound(UserId),

    #[error("Unknown subtype: {0}")]
    SubtypeNotFound(String),

    /// The result store could not be reached or written.
    #[error("Result store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AssessmentError {
    pub fn missing_input() -> Self {
        AssessmentError::MissingInput
    }

    pub fn retake_not_allowed(next_retake_date: Timestamp) -> Self {
        AssessmentError::RetakeNotAllowed { next_retake_date }
    }

    pub fn not_found(user_id: UserId) -> Self {
        AssessmentError::NotFound(user_id)
    }

    pub fn subtype_not_found(slug: impl Into<String>) -> Self {
        AssessmentError::SubtypeNotFound(slug.into())
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        AssessmentError::StoreUnavailable(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AssessmentError::MissingInput => ErrorCode::MissingInput,
            AssessmentError::InvalidInput(_) => ErrorCode::InvalidInput,
            AssessmentError::RetakeNotAllowed { .. } => ErrorCode::RetakeNotAllowed,
            AssessmentError::NotFound(_) => ErrorCode::AssessmentNotFound,
            AssessmentError::SubtypeNotFound(_) => ErrorCode::SubtypeNotFound,
            AssessmentError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
            AssessmentError::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Structured fields a caller can use to render a specific message.
    pub fn details(&self) -> Vec<(&'static str, String)> {
        match self {
            AssessmentError::InvalidInput(AnswerSetError::WrongLength { expected, actual }) => vec![
                ("expected", expected.to_string()),
                ("actual", actual.to_string()),
            ],
            AssessmentError::InvalidInput(AnswerSetError::InvalidLabel { index, value }) => {
                vec![("index", index.to_string()), ("value", value.clone())]
            }
            AssessmentError::RetakeNotAllowed { next_retake_date } => {
                vec![("nextRetakeDate", next_retake_date.to_rfc3339())]
            }
            AssessmentError::SubtypeNotFound(slug) => vec![("slug", slug.clone())],
            _ => Vec::new(),
        }
    }

    /// Returns true if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AssessmentError::StoreUnavailable(_))
    }
}

impl From<DomainError> for AssessmentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::StoreUnavailable => AssessmentError::StoreUnavailable(err.message),
            _ => AssessmentError::Internal(err.to_string()),
        }
    }
}

impl From<AssessmentError> for DomainError {
    fn from(err: AssessmentError) -> Self {
        let mut domain = DomainError::new(err.code(), err.message());
        for (key, value) in err.details() {
            domain = domain.with_detail(key, value);
        }
        domain
    }
}
