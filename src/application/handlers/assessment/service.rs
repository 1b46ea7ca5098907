//! AssessmentService - Composition root for the assessment handlers.

use std::sync::Arc;

use super::{
    CheckEligibilityHandler, CheckEligibilityQuery, GetLatestResultHandler, GetLatestResultQuery,
    GetResultHistoryHandler, GetResultHistoryQuery, GetSubtypeProfileHandler,
    GetSubtypeProfileQuery, StoreRetryPolicy, SubmitAssessmentCommand, SubmitAssessmentHandler,
    SubmitAssessmentResult,
};
use crate::domain::assessment::{
    AssessmentError, ClassificationResult, Eligibility, RetakePolicy, ScoringModel,
    SubtypeProfile,
};
use crate::ports::{AssessmentResultStore, Clock};

/// Owns the store handle, the clock and the assessment policies.
///
/// One instance per process, built at startup and shared behind an `Arc`.
#[derive(Clone)]
pub struct AssessmentService {
    store: Arc<dyn AssessmentResultStore>,
    clock: Arc<dyn Clock>,
    scoring: ScoringModel,
    retake_policy: RetakePolicy,
    retry: StoreRetryPolicy,
}

impl AssessmentService {
    /// Service with the standard scoring table and default policies.
    pub fn new(store: Arc<dyn AssessmentResultStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            scoring: ScoringModel::default(),
            retake_policy: RetakePolicy::default(),
            retry: StoreRetryPolicy::default(),
        }
    }

    pub fn with_scoring_model(mut self, scoring: ScoringModel) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_retake_policy(mut self, retake_policy: RetakePolicy) -> Self {
        self.retake_policy = retake_policy;
        self
    }

    pub fn with_retry_policy(mut self, retry: StoreRetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn retake_policy(&self) -> RetakePolicy {
        self.retake_policy
    }

    // === Handler factories ===

    pub fn submit_handler(&self) -> SubmitAssessmentHandler {
        SubmitAssessmentHandler::new(
            self.store.clone(),
            self.clock.clone(),
            self.scoring.clone(),
            self.retake_policy,
            self.retry,
        )
    }

    pub fn eligibility_handler(&self) -> CheckEligibilityHandler {
        CheckEligibilityHandler::new(
            self.store.clone(),
            self.clock.clone(),
            self.retake_policy,
            self.retry,
        )
    }

    pub fn latest_result_handler(&self) -> GetLatestResultHandler {
        GetLatestResultHandler::new(self.store.clone(), self.retry)
    }

    pub fn history_handler(&self) -> GetResultHistoryHandler {
        GetResultHistoryHandler::new(self.store.clone(), self.retry)
    }

    // === Operations ===

    pub async fn submit(
        &self,
        cmd: SubmitAssessmentCommand,
    ) -> Result<SubmitAssessmentResult, AssessmentError> {
        self.submit_handler().handle(cmd).await
    }

    pub async fn check_eligibility(
        &self,
        query: CheckEligibilityQuery,
    ) -> Result<Eligibility, AssessmentError> {
        self.eligibility_handler().handle(query).await
    }

    pub async fn get_latest_result(
        &self,
        query: GetLatestResultQuery,
    ) -> Result<ClassificationResult, AssessmentError> {
        self.latest_result_handler().handle(query).await
    }

    pub async fn get_result_history(
        &self,
        query: GetResultHistoryQuery,
    ) -> Result<Vec<ClassificationResult>, AssessmentError> {
        self.history_handler().handle(query).await
    }

    pub fn get_subtype_profile(
        &self,
        query: GetSubtypeProfileQuery,
    ) -> Result<&'static SubtypeProfile, AssessmentError> {
        GetSubtypeProfileHandler::new().handle(query)
    }
}
