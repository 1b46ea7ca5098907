//! End-to-end tests for the assessment service over the in-memory store.
//!
//! These tests drive the public API the way the HTTP layer does:
//! 1. Submitting answers classifies and stores a record
//! 2. The retake cooldown gates further submissions
//! 3. Concurrent submissions for one user write exactly one record

use std::sync::Arc;

use chrono::Duration;
use futures::future::join_all;

use entrepreneurial_dna::adapters::{FixedClock, InMemoryResultStore};
use entrepreneurial_dna::application::{
    AssessmentService, CheckEligibilityQuery, GetLatestResultQuery, GetResultHistoryQuery,
    SubmitAssessmentCommand,
};
use entrepreneurial_dna::domain::assessment::{AssessmentError, DnaType, SubtypeSlug};
use entrepreneurial_dna::domain::foundation::{Percentage, Timestamp, UserId};
use entrepreneurial_dna::ports::Clock;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Harness {
    store: Arc<InMemoryResultStore>,
    clock: Arc<FixedClock>,
    service: AssessmentService,
}

impl Harness {
    fn new() -> Self {
        let store = Arc::new(InMemoryResultStore::new());
        let clock = Arc::new(FixedClock::new(Timestamp::now().truncated_to_millis()));
        let service = AssessmentService::new(store.clone(), clock.clone());
        Self {
            store,
            clock,
            service,
        }
    }
}

fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

fn submission(user_id: &UserId, answers: &str) -> SubmitAssessmentCommand {
    SubmitAssessmentCommand {
        user_id: user_id.clone(),
        responses: Some(answers.chars().map(String::from).collect()),
    }
}

/// Ten architect answers followed by ten aware answers.
const PURE_ARCHITECT: &str = "AAAAAAAAAAAAAAAAAAAA";

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn first_submission_classifies_and_sets_next_retake_date() {
    let h = Harness::new();
    let alice = user("alice");
    let now = h.clock.now();

    let submitted = h.service.submit(submission(&alice, PURE_ARCHITECT)).await.unwrap();

    assert_eq!(submitted.result.dominant_type, DnaType::Architect);
    assert_eq!(submitted.result.awareness_percentage, Percentage::HUNDRED);
    assert_eq!(submitted.result.subtype, SubtypeSlug::UltimateStrategist);
    assert_eq!(submitted.result.created_at, now);
    assert_eq!(submitted.next_retake_date, now.add_days(30));

    let latest = h
        .service
        .get_latest_result(GetLatestResultQuery {
            user_id: alice.clone(),
        })
        .await
        .unwrap();
    assert_eq!(latest.id, submitted.result.id);
}

#[tokio::test]
async fn immediate_retake_is_rejected_without_side_effects() {
    let h = Harness::new();
    let alice = user("alice");
    let first = h.service.submit(submission(&alice, PURE_ARCHITECT)).await.unwrap();

    let err = h
        .service
        .submit(submission(&alice, "BBBBBBBBBBBBBBBBBBBB"))
        .await
        .unwrap_err();

    assert_eq!(err, AssessmentError::retake_not_allowed(first.next_retake_date));
    assert_eq!(h.store.record_count(&alice).await, 1);
}

#[tokio::test]
async fn cooldown_opens_after_thirty_days() {
    let h = Harness::new();
    let alice = user("alice");
    h.service.submit(submission(&alice, PURE_ARCHITECT)).await.unwrap();

    h.clock.advance(Duration::days(29));
    let eligibility = h
        .service
        .check_eligibility(CheckEligibilityQuery {
            user_id: alice.clone(),
        })
        .await
        .unwrap();
    assert!(!eligibility.can_retake);
    assert_eq!(
        eligibility.next_retake_date,
        Some(h.clock.now().add_days(1))
    );

    h.clock.advance(Duration::days(2));
    let eligibility = h
        .service
        .check_eligibility(CheckEligibilityQuery {
            user_id: alice.clone(),
        })
        .await
        .unwrap();
    assert!(eligibility.can_retake);
    assert_eq!(eligibility.next_retake_date, None);

    let retake = h
        .service
        .submit(submission(&alice, "BBBBBBBBBBBBBBBBBBBB"))
        .await
        .unwrap();
    assert_eq!(retake.result.dominant_type, DnaType::Alchemist);

    let history = h
        .service
        .get_result_history(GetResultHistoryQuery {
            user_id: alice.clone(),
            limit: None,
        })
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, retake.result.id);
}

#[tokio::test]
async fn unknown_user_has_no_result_and_can_take_assessment() {
    let h = Harness::new();
    let bob = user("bob");

    let err = h
        .service
        .get_latest_result(GetLatestResultQuery {
            user_id: bob.clone(),
        })
        .await
        .unwrap_err();
    assert_eq!(err, AssessmentError::not_found(bob.clone()));

    let eligibility = h
        .service
        .check_eligibility(CheckEligibilityQuery { user_id: bob })
        .await
        .unwrap();
    assert!(eligibility.can_retake);
    assert!(eligibility.last_taken_at.is_none());
}

#[tokio::test]
async fn users_do_not_share_cooldowns() {
    let h = Harness::new();
    h.service
        .submit(submission(&user("alice"), PURE_ARCHITECT))
        .await
        .unwrap();

    let other = h
        .service
        .submit(submission(&user("carol"), PURE_ARCHITECT))
        .await;
    assert!(other.is_ok());
}

#[tokio::test]
async fn concurrent_submissions_write_exactly_one_record() {
    let h = Harness::new();
    let alice = user("alice");

    let attempts = (0..10).map(|_| {
        let service = h.service.clone();
        let cmd = submission(&alice, PURE_ARCHITECT);
        tokio::spawn(async move { service.submit(cmd).await })
    });
    let outcomes: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let accepted = outcomes.iter().filter(|o| o.is_ok()).count();
    let rejected = outcomes
        .iter()
        .filter(|o| matches!(o, Err(AssessmentError::RetakeNotAllowed { .. })))
        .count();

    assert_eq!(accepted, 1);
    assert_eq!(rejected, 9);
    assert_eq!(h.store.record_count(&alice).await, 1);
}
