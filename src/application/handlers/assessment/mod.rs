//! Assessment handlers.
//!
//! Command and query handlers for the Entrepreneurial DNA assessment:
//!
//! ## Commands
//! - Submitting a completed questionnaire
//!
//! ## Queries
//! - Retake eligibility
//! - Latest result
//! - Result history
//! - Subtype profile lookup

mod check_eligibility;
mod get_latest_result;
mod get_result_history;
mod get_subtype_profile;
mod retry;
mod service;
mod submit_assessment;

// Commands
pub use submit_assessment::{
    SubmitAssessmentCommand, SubmitAssessmentHandler, SubmitAssessmentResult,
};

// Queries
pub use check_eligibility::{CheckEligibilityHandler, CheckEligibilityQuery};
pub use get_latest_result::{GetLatestResultHandler, GetLatestResultQuery};
pub use get_result_history::{
    GetResultHistoryHandler, GetResultHistoryQuery, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT,
};
pub use get_subtype_profile::{GetSubtypeProfileHandler, GetSubtypeProfileQuery};

pub use retry::StoreRetryPolicy;
pub use service::AssessmentService;
