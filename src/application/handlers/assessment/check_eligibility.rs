//! CheckEligibilityHandler - Query handler for retake eligibility.

use std::sync::Arc;

use super::retry::StoreRetryPolicy;
use crate::domain::assessment::{AssessmentError, Eligibility, RetakePolicy};
use crate::domain::foundation::UserId;
use crate::ports::{AssessmentResultStore, Clock};

/// Query for a user's retake eligibility.
#[derive(Debug, Clone)]
pub struct CheckEligibilityQuery {
    pub user_id: UserId,
}

/// Handler for eligibility checks.
pub struct CheckEligibilityHandler {
    store: Arc<dyn AssessmentResultStore>,
    clock: Arc<dyn Clock>,
    retake_policy: RetakePolicy,
    retry: StoreRetryPolicy,
}

impl CheckEligibilityHandler {
    pub fn new(
        store: Arc<dyn AssessmentResultStore>,
        clock: Arc<dyn Clock>,
        retake_policy: RetakePolicy,
        retry: StoreRetryPolicy,
    ) -> Self {
        Self {
            store,
            clock,
            retake_policy,
            retry,
        }
    }

    pub async fn handle(&self, query: CheckEligibilityQuery) -> Result<Eligibility, AssessmentError> {
        let store = &self.store;
        let user_id = &query.user_id;
        let latest = self
            .retry
            .run("find_latest_for_user", || async move {
                store.find_latest_for_user(user_id).await.map_err(AssessmentError::from)
            })
            .await?;

        Ok(self.retake_policy.evaluate(latest.as_ref(), self.clock.now()))
    }
}
