//! GetLatestResultHandler - Query handler for a user's current classification.

use std::sync::Arc;

use super::retry::StoreRetryPolicy;
use crate::domain::assessment::{AssessmentError, ClassificationResult};
use crate::domain::foundation::UserId;
use crate::ports::AssessmentResultStore;

/// Query for the user's most recent result.
#[derive(Debug, Clone)]
pub struct GetLatestResultQuery {
    pub user_id: UserId,
}

/// Handler for latest-result reads.
///
/// A user with no result gets `NotFound`, which is an expected outcome.
pub struct GetLatestResultHandler {
    store: Arc<dyn AssessmentResultStore>,
    retry: StoreRetryPolicy,
}

impl GetLatestResultHandler {
    pub fn new(store: Arc<dyn AssessmentResultStore>, retry: StoreRetryPolicy) -> Self {
        Self { store, retry }
    }

    pub async fn handle(
        &self,
        query: GetLatestResultQuery,
    ) -> Result<ClassificationResult, AssessmentError> {
        let store = &self.store;
        let user_id = &query.user_id;
        self.retry
            .run("find_latest_for_user", || async move {
                store.find_latest_for_user(user_id).await.map_err(AssessmentError::from)
            })
            .await?
            .ok_or_else(|| AssessmentError::not_found(query.user_id.clone()))
    }
}
