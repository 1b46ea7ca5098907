//! In-memory implementation of AssessmentResultStore.
//!
//! Records live for the lifetime of the process. The conditional append is
//! evaluated under the write lock, so concurrent submissions for one user are
//! serialized while reads proceed in parallel.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::assessment::{latest_of, ClassificationResult};
use crate::domain::foundation::{AssessmentResultId, DomainError, UserId};
use crate::ports::{AppendOutcome, AssessmentResultStore};

/// Append-only record store backed by a map of per-user vectors.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryResultStore::new());
/// let service = AssessmentService::new(store.clone(), Arc::new(SystemClock));
///
/// // Assert in tests
/// assert_eq!(store.record_count(&user_id).await, 1);
/// ```
#[derive(Default)]
pub struct InMemoryResultStore {
    records: RwLock<HashMap<UserId, Vec<ClassificationResult>>>,
}

impl InMemoryResultStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `records`.
    pub fn with_records(records: impl IntoIterator<Item = ClassificationResult>) -> Self {
        let mut by_user: HashMap<UserId, Vec<ClassificationResult>> = HashMap::new();
        for record in records {
            by_user.entry(record.user_id.clone()).or_default().push(record);
        }
        Self {
            records: RwLock::new(by_user),
        }
    }

    // === Test Helpers ===

    /// Number of records stored for the user.
    pub async fn record_count(&self, user_id: &UserId) -> usize {
        self.records
            .read()
            .await
            .get(user_id)
            .map_or(0, |records| records.len())
    }
}

#[async_trait]
impl AssessmentResultStore for InMemoryResultStore {
    async fn find_latest_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ClassificationResult>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .get(user_id)
            .and_then(|records| latest_of(records))
            .cloned())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<ClassificationResult>, DomainError> {
        let records = self.records.read().await;
        let mut history = records.get(user_id).cloned().unwrap_or_default();
        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        history.truncate(limit);
        Ok(history)
    }

    async fn append_if_latest(
        &self,
        expected: Option<AssessmentResultId>,
        record: &ClassificationResult,
    ) -> Result<AppendOutcome, DomainError> {
        let mut records = self.records.write().await;
        let user_records = records.entry(record.user_id.clone()).or_default();

        let current = latest_of(user_records.iter());
        if current.map(|latest| latest.id) != expected {
            return Ok(AppendOutcome::Conflict {
                current: current.cloned(),
            });
        }

        user_records.push(record.clone());
        Ok(AppendOutcome::Appended)
    }
}
