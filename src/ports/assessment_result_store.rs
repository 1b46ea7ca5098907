//! Assessment result store port.
//!
//! Append-only storage of classification records keyed by user.
//!
//! # Design
//!
//! - **Append-only**: records are never updated or deleted
//! - **Latest wins**: the record with the maximum `created_at` is authoritative
//! - **Conditional append**: the eligibility check and the write happen as one
//!   atomic unit per user, keyed on the id of the latest record the caller saw
//!
//! # Example
//!
//! ```ignore
//! let latest = store.find_latest_for_user(&user_id).await?;
//! let expected = latest.as_ref().map(|r| r.id);
//! match store.append_if_latest(expected, &record).await? {
//!     AppendOutcome::Appended => { /* new latest */ }
//!     AppendOutcome::Conflict { current } => { /* someone else wrote first */ }
//! }
//! ```

use crate::domain::assessment::ClassificationResult;
use crate::domain::foundation::{AssessmentResultId, DomainError, UserId};
use async_trait::async_trait;

/// Result of a conditional append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The record was written and is now the user's latest.
    Appended,

    /// The user's latest record was not the expected one; nothing was written.
    Conflict {
        /// The record that is currently latest, if any.
        current: Option<ClassificationResult>,
    },
}

/// Store port for classification records.
///
/// Implementations must ensure:
/// - `append_if_latest` is atomic per user
/// - records for different users never contend with each other
/// - a failed or cancelled append leaves no partial record
#[async_trait]
pub trait AssessmentResultStore: Send + Sync {
    /// Most recent record for the user.
    ///
    /// Returns `None` if the user has never completed the assessment.
    async fn find_latest_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ClassificationResult>, DomainError>;

    /// The user's records, newest first, at most `limit`.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<ClassificationResult>, DomainError>;

    /// Appends `record` only if the user's latest record id equals `expected`.
    ///
    /// `expected = None` means "the user has no records yet".
    ///
    /// # Errors
    ///
    /// - `StoreUnavailable` if the store cannot be reached or written
    async fn append_if_latest(
        &self,
        expected: Option<AssessmentResultId>,
        record: &ClassificationResult,
    ) -> Result<AppendOutcome, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn assessment_result_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn AssessmentResultStore) {}
    }
}
