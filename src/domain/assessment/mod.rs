//! Assessment module - Entrepreneurial DNA scoring, classification and
//! retake eligibility.
//!
//! Everything here is pure. Persistence and time are reached through ports.

mod answer;
mod dna_type;
mod eligibility;
mod errors;
mod result;
mod scoring;
mod scoring_table;
mod subtype;

pub use answer::{
    AnswerLabel, AnswerSet, AnswerSetError, UnknownLabel, AWARENESS_QUESTIONS,
    DEFAULT_TYPE_QUESTIONS, QUESTION_COUNT,
};
pub use dna_type::{Axis, DnaType};
pub use eligibility::{
    Eligibility, RetakePolicy, DEFAULT_RETAKE_COOLDOWN_DAYS, MAX_RETAKE_COOLDOWN_DAYS,
};
pub use errors::AssessmentError;
pub use result::{latest_of, ClassificationResult};
pub use scoring::{classify, score, Score, ScoringModel, AWARENESS_THRESHOLD};
pub use scoring_table::{AwarenessRule, DefaultTypeRule, LabelSet, ScoringTable, ScoringTableError};
pub use subtype::{SubtypeCategory, SubtypeProfile, SubtypeSlug};
