//! Persisted classification record.

use serde::{Deserialize, Serialize};

use super::answer::AnswerSet;
use super::dna_type::DnaType;
use super::scoring::Score;
use super::subtype::SubtypeSlug;
use crate::domain::foundation::{AssessmentResultId, Percentage, Timestamp, UserId};

/// One completed assessment for one user.
///
/// Records are immutable. A retake appends a new record; older records stay
/// queryable but stop driving eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub id: AssessmentResultId,
    pub user_id: UserId,
    pub dominant_type: DnaType,
    pub awareness_percentage: Percentage,
    pub architect_score: u8,
    pub alchemist_score: u8,
    pub subtype: SubtypeSlug,
    pub raw_responses: AnswerSet,
    pub created_at: Timestamp,
}

impl ClassificationResult {
    /// Builds a new record with a fresh id.
    pub fn record(user_id: UserId, responses: AnswerSet, score: &Score, created_at: Timestamp) -> Self {
        Self {
            id: AssessmentResultId::new(),
            user_id,
            dominant_type: score.dominant_type,
            awareness_percentage: score.awareness_percentage,
            architect_score: score.architect_score,
            alchemist_score: score.alchemist_score,
            subtype: score.subtype,
            raw_responses: responses,
            created_at,
        }
    }

    /// True if this record supersedes `other` as the user's latest.
    pub fn supersedes(&self, other: &ClassificationResult) -> bool {
        self.created_at.is_after(&other.created_at)
    }
}

/// Latest record of a collection: maximum `created_at`.
pub fn latest_of<'a, I>(records: I) -> Option<&'a ClassificationResult>
where
    I: IntoIterator<Item = &'a ClassificationResult>,
{
    records.into_iter().max_by_key(|record| record.created_at)
}
