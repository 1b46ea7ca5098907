//! GetResultHistoryHandler - Query handler for every attempt a user made.

use std::sync::Arc;

use super::retry::StoreRetryPolicy;
use crate::domain::assessment::{AssessmentError, ClassificationResult};
use crate::domain::foundation::UserId;
use crate::ports::AssessmentResultStore;

/// Records returned when the caller gives no limit.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Upper bound on records per request.
pub const MAX_HISTORY_LIMIT: usize = 100;

/// Query for a user's result history.
#[derive(Debug, Clone)]
pub struct GetResultHistoryQuery {
    pub user_id: UserId,
    pub limit: Option<usize>,
}

impl GetResultHistoryQuery {
    /// Requested limit, defaulted and clamped to `1..=MAX_HISTORY_LIMIT`.
    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT)
    }
}

/// Handler for history reads. Newest first; an empty list is not an error.
pub struct GetResultHistoryHandler {
    store: Arc<dyn AssessmentResultStore>,
    retry: StoreRetryPolicy,
}

impl GetResultHistoryHandler {
    pub fn new(store: Arc<dyn AssessmentResultStore>, retry: StoreRetryPolicy) -> Self {
        Self { store, retry }
    }

    pub async fn handle(
        &self,
        query: GetResultHistoryQuery,
    ) -> Result<Vec<ClassificationResult>, AssessmentError> {
        let store = &self.store;
        let user_id = &query.user_id;
        let limit = query.effective_limit();
        self.retry
            .run("list_for_user", || async move {
                store
                    .list_for_user(user_id, limit)
                    .await
                    .map_err(AssessmentError::from)
            })
            .await
    }
}
