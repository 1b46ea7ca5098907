//! SubmitAssessmentHandler - Command handler for completing the assessment.

use std::sync::Arc;

use tracing::{debug, info};

use super::retry::StoreRetryPolicy;
use crate::domain::assessment::{
    AssessmentError, ClassificationResult, RetakePolicy, ScoringModel,
};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{AppendOutcome, AssessmentResultStore, Clock};

/// Conditional-append rounds before giving up on a contended user.
const MAX_APPEND_ROUNDS: usize = 3;

/// Command to submit a completed questionnaire.
#[derive(Debug, Clone)]
pub struct SubmitAssessmentCommand {
    pub user_id: UserId,
    /// Raw answer labels in question order. `None` when the caller sent no
    /// list at all.
    pub responses: Option<Vec<String>>,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitAssessmentResult {
    pub result: ClassificationResult,
    pub next_retake_date: Timestamp,
}

/// Handler for assessment submissions.
///
/// Order of operations:
/// 1. Presence check on the responses
/// 2. Eligibility gate against the latest record
/// 3. Shape validation and scoring
/// 4. Conditional append keyed on the latest record seen in step 2
///
/// A rejected submission writes nothing.
pub struct SubmitAssessmentHandler {
    store: Arc<dyn AssessmentResultStore>,
    clock: Arc<dyn Clock>,
    scoring: ScoringModel,
    retake_policy: RetakePolicy,
    retry: StoreRetryPolicy,
}

impl SubmitAssessmentHandler {
    pub fn new(
        store: Arc<dyn AssessmentResultStore>,
        clock: Arc<dyn Clock>,
        scoring: ScoringModel,
        retake_policy: RetakePolicy,
        retry: StoreRetryPolicy,
    ) -> Self {
        Self {
            store,
            clock,
            scoring,
            retake_policy,
            retry,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitAssessmentCommand,
    ) -> Result<SubmitAssessmentResult, AssessmentError> {
        let responses = cmd.responses.ok_or(AssessmentError::MissingInput)?;
        let store = &self.store;
        let user_id = &cmd.user_id;

        // 1. Eligibility gate
        let latest = self
            .retry
            .run("find_latest_for_user", || async move {
                store.find_latest_for_user(user_id).await.map_err(AssessmentError::from)
            })
            .await?;

        let now = self.clock.now();
        let eligibility = self.retake_policy.evaluate(latest.as_ref(), now);
        if let Some(next_retake_date) = eligibility.next_retake_date {
            debug!(
                user_id = %user_id,
                next_retake_date = %next_retake_date,
                "Assessment retake rejected"
            );
            return Err(AssessmentError::retake_not_allowed(next_retake_date));
        }

        // 2. Validate and score
        let (answers, score) = self.scoring.evaluate(&responses)?;
        let record = ClassificationResult::record(
            user_id.clone(),
            answers,
            &score,
            now.truncated_to_millis(),
        );

        // 3. Conditional append
        let mut expected = latest.map(|r| r.id);
        let mut appended = false;
        for _ in 0..MAX_APPEND_ROUNDS {
            let record_ref = &record;
            let outcome = self
                .retry
                .run("append_if_latest", || async move {
                    store
                        .append_if_latest(expected, record_ref)
                        .await
                        .map_err(AssessmentError::from)
                })
                .await?;

            match outcome {
                AppendOutcome::Appended => {
                    appended = true;
                    break;
                }
                // An earlier attempt landed before its acknowledgement was lost.
                AppendOutcome::Conflict { current: Some(current) } if current.id == record.id => {
                    appended = true;
                    break;
                }
                AppendOutcome::Conflict { current } => {
                    let eligibility = self.retake_policy.evaluate(current.as_ref(), now);
                    if let Some(next_retake_date) = eligibility.next_retake_date {
                        debug!(
                            user_id = %user_id,
                            next_retake_date = %next_retake_date,
                            "Concurrent submission won the eligibility window"
                        );
                        return Err(AssessmentError::retake_not_allowed(next_retake_date));
                    }
                    expected = current.map(|r| r.id);
                }
            }
        }

        if !appended {
            return Err(AssessmentError::store_unavailable(format!(
                "latest result for user {} kept changing during submission",
                user_id
            )));
        }

        info!(
            user_id = %record.user_id,
            result_id = %record.id,
            dominant_type = %record.dominant_type,
            awareness_percentage = record.awareness_percentage.value(),
            subtype = %record.subtype,
            "Assessment submitted"
        );

        Ok(SubmitAssessmentResult {
            next_retake_date: self.retake_policy.next_retake_after(&record.created_at),
            result: record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::memory::InMemoryResultStore;
    use crate::domain::assessment::{AnswerSetError, DnaType, SubtypeSlug};
    use crate::domain::foundation::{AssessmentResultId, DomainError, Percentage};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    /// Store that fails a configurable number of calls before delegating.
    struct FlakyStore {
        inner: InMemoryResultStore,
        failures_left: AtomicU32,
        /// Report store failure after the write lands, as a lost ack would.
        lose_first_ack: Mutex<bool>,
        append_calls: AtomicU32,
    }

    impl FlakyStore {
        fn failing(times: u32) -> Self {
            Self {
                inner: InMemoryResultStore::new(),
                failures_left: AtomicU32::new(times),
                lose_first_ack: Mutex::new(false),
                append_calls: AtomicU32::new(0),
            }
        }

        fn losing_first_ack() -> Self {
            let store = Self::failing(0);
            *store.lose_first_ack.lock().unwrap() = true;
            store
        }

        fn maybe_fail(&self) -> Result<(), DomainError> {
            let left = self.failures_left.load(Ordering::SeqCst);
            if left > 0 {
                self.failures_left.store(left - 1, Ordering::SeqCst);
                return Err(DomainError::store_unavailable("connection refused"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl AssessmentResultStore for FlakyStore {
        async fn find_latest_for_user(
            &self,
            user_id: &UserId,
        ) -> Result<Option<ClassificationResult>, DomainError> {
            self.maybe_fail()?;
            self.inner.find_latest_for_user(user_id).await
        }

        async fn list_for_user(
            &self,
            user_id: &UserId,
            limit: usize,
        ) -> Result<Vec<ClassificationResult>, DomainError> {
            self.maybe_fail()?;
            self.inner.list_for_user(user_id, limit).await
        }

        async fn append_if_latest(
            &self,
            expected: Option<AssessmentResultId>,
            record: &ClassificationResult,
        ) -> Result<AppendOutcome, DomainError> {
            self.append_calls.fetch_add(1, Ordering::SeqCst);
            self.maybe_fail()?;
            let outcome = self.inner.append_if_latest(expected, record).await?;
            let mut lose = self.lose_first_ack.lock().unwrap();
            if *lose {
                *lose = false;
                return Err(DomainError::store_unavailable("connection reset"));
            }
            Ok(outcome)
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn user() -> UserId {
        UserId::new("user-123").unwrap()
    }

    fn labels(s: &str) -> Vec<String> {
        s.chars().map(String::from).collect()
    }

    fn all_architect_all_aware() -> Vec<String> {
        labels("AAAAAAAAAAAAAAAAAAAA")
    }

    fn handler_with(
        store: Arc<dyn AssessmentResultStore>,
        clock: Arc<FixedClock>,
    ) -> SubmitAssessmentHandler {
        SubmitAssessmentHandler::new(
            store,
            clock,
            ScoringModel::default(),
            RetakePolicy::default(),
            StoreRetryPolicy::new(3, Duration::from_millis(1)),
        )
    }

    fn command(responses: Option<Vec<String>>) -> SubmitAssessmentCommand {
        SubmitAssessmentCommand {
            user_id: user(),
            responses,
        }
    }

    fn prior_result(created_at: Timestamp) -> ClassificationResult {
        let (answers, score) = ScoringModel::default()
            .evaluate(&labels("BBBBBBBBBBAAAAAAAAAA"))
            .unwrap();
        ClassificationResult::record(user(), answers, &score, created_at)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn first_submission_scores_and_persists() {
        let now = Timestamp::now().truncated_to_millis();
        let store = Arc::new(InMemoryResultStore::new());
        let handler = handler_with(store.clone(), Arc::new(FixedClock::new(now)));

        let result = handler
            .handle(command(Some(all_architect_all_aware())))
            .await
            .unwrap();

        assert_eq!(result.result.dominant_type, DnaType::Architect);
        assert_eq!(result.result.awareness_percentage, Percentage::HUNDRED);
        assert_eq!(result.result.subtype, SubtypeSlug::UltimateStrategist);
        assert_eq!(result.result.created_at, now);
        assert_eq!(result.next_retake_date, now.add_days(30));
        assert_eq!(
            store.find_latest_for_user(&user()).await.unwrap(),
            Some(result.result)
        );
    }

    #[tokio::test]
    async fn stored_created_at_is_millisecond_precise() {
        let precise = Timestamp::from_datetime(
            chrono::DateTime::parse_from_rfc3339("2024-03-01T08:15:30.123456789Z")
                .unwrap()
                .with_timezone(&chrono::Utc),
        );
        let store = Arc::new(InMemoryResultStore::new());
        let clock = Arc::new(FixedClock::new(precise));
        let handler = handler_with(store.clone(), clock.clone());

        let submitted = handler
            .handle(command(Some(all_architect_all_aware())))
            .await
            .unwrap();

        assert_eq!(submitted.result.created_at, precise.truncated_to_millis());
        assert_eq!(
            submitted.result.created_at.as_datetime().timestamp_subsec_nanos() % 1_000_000,
            0
        );

        // A later eligibility check reports the same retake date as the submit.
        let stored = store.find_latest_for_user(&user()).await.unwrap().unwrap();
        let eligibility = RetakePolicy::default().evaluate(Some(&stored), precise);
        assert_eq!(eligibility.next_retake_date, Some(submitted.next_retake_date));
        assert_eq!(
            submitted.next_retake_date.to_rfc3339(),
            "2024-03-31T08:15:30.123Z"
        );
    }

    #[tokio::test]
    async fn retake_after_window_appends_new_record() {
        let now = Timestamp::now();
        let old = prior_result(now.minus_days(31));
        let store = Arc::new(InMemoryResultStore::with_records(vec![old.clone()]));
        let handler = handler_with(store.clone(), Arc::new(FixedClock::new(now)));

        let result = handler
            .handle(command(Some(all_architect_all_aware())))
            .await
            .unwrap();

        assert_ne!(result.result.id, old.id);
        assert_eq!(store.record_count(&user()).await, 2);
        assert_eq!(
            store.find_latest_for_user(&user()).await.unwrap().unwrap().id,
            result.result.id
        );
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Rejection Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn missing_responses_is_missing_input() {
        let store = Arc::new(InMemoryResultStore::new());
        let handler = handler_with(store.clone(), Arc::new(FixedClock::new(Timestamp::now())));

        let err = handler.handle(command(None)).await.unwrap_err();
        assert_eq!(err, AssessmentError::MissingInput);
        assert_eq!(store.record_count(&user()).await, 0);
    }

    #[tokio::test]
    async fn wrong_length_is_invalid_input() {
        let store = Arc::new(InMemoryResultStore::new());
        let handler = handler_with(store.clone(), Arc::new(FixedClock::new(Timestamp::now())));

        let err = handler
            .handle(command(Some(labels("AAAAAAAAAAAAAAAAAAA"))))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AssessmentError::InvalidInput(AnswerSetError::WrongLength {
                expected: 20,
                actual: 19
            })
        );
        assert_eq!(store.record_count(&user()).await, 0);
    }

    #[tokio::test]
    async fn retake_within_window_is_rejected_without_writing() {
        let now = Timestamp::now();
        let old = prior_result(now.minus_days(29));
        let store = Arc::new(InMemoryResultStore::with_records(vec![old.clone()]));
        let handler = handler_with(store.clone(), Arc::new(FixedClock::new(now)));

        let err = handler
            .handle(command(Some(all_architect_all_aware())))
            .await
            .unwrap_err();

        assert_eq!(err, AssessmentError::retake_not_allowed(now.add_days(1)));
        assert_eq!(store.record_count(&user()).await, 1);
        assert_eq!(store.find_latest_for_user(&user()).await.unwrap(), Some(old));
    }

    #[tokio::test]
    async fn ineligible_user_gets_retake_error_even_with_bad_answers() {
        let now = Timestamp::now();
        let store = Arc::new(InMemoryResultStore::with_records(vec![prior_result(
            now.minus_days(2),
        )]));
        let handler = handler_with(store, Arc::new(FixedClock::new(now)));

        let err = handler
            .handle(command(Some(labels("XYZ"))))
            .await
            .unwrap_err();
        assert!(matches!(err, AssessmentError::RetakeNotAllowed { .. }));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Store Failure Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn transient_store_failures_are_retried() {
        let store = Arc::new(FlakyStore::failing(2));
        let handler = handler_with(store.clone(), Arc::new(FixedClock::new(Timestamp::now())));

        let result = handler.handle(command(Some(all_architect_all_aware()))).await;
        assert!(result.is_ok());
        assert_eq!(store.inner.record_count(&user()).await, 1);
    }

    #[tokio::test]
    async fn exhausted_retries_surface_store_unavailable() {
        let store = Arc::new(FlakyStore::failing(10));
        let handler = handler_with(store.clone(), Arc::new(FixedClock::new(Timestamp::now())));

        let err = handler
            .handle(command(Some(all_architect_all_aware())))
            .await
            .unwrap_err();
        assert!(matches!(err, AssessmentError::StoreUnavailable(_)));
        assert!(err.is_retryable());
        assert_eq!(store.inner.record_count(&user()).await, 0);
    }

    #[tokio::test]
    async fn lost_acknowledgement_does_not_duplicate_record() {
        let store = Arc::new(FlakyStore::losing_first_ack());
        let handler = handler_with(store.clone(), Arc::new(FixedClock::new(Timestamp::now())));

        let result = handler
            .handle(command(Some(all_architect_all_aware())))
            .await
            .unwrap();

        assert_eq!(store.append_calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.inner.record_count(&user()).await, 1);
        assert_eq!(
            store.inner.find_latest_for_user(&user()).await.unwrap().unwrap().id,
            result.result.id
        );
    }
}
