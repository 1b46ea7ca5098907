//! Answer labels and the fixed-shape answer set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Total number of questions in one assessment.
pub const QUESTION_COUNT: usize = 20;

/// Questions 1-10 decide the default (Architect vs Alchemist) lean.
pub const DEFAULT_TYPE_QUESTIONS: usize = 10;

/// Questions 11-20 measure awareness of the opposite style.
pub const AWARENESS_QUESTIONS: usize = QUESTION_COUNT - DEFAULT_TYPE_QUESTIONS;

/// One answer choice. The alphabet is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AnswerLabel {
    A,
    B,
    C,
    D,
}

impl AnswerLabel {
    /// Every label, in alphabet order.
    pub const ALL: [AnswerLabel; 4] = [AnswerLabel::A, AnswerLabel::B, AnswerLabel::C, AnswerLabel::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerLabel::A => "A",
            AnswerLabel::B => "B",
            AnswerLabel::C => "C",
            AnswerLabel::D => "D",
        }
    }

    /// Position in the alphabet (A = 0).
    pub(crate) fn ordinal(&self) -> u8 {
        match self {
            AnswerLabel::A => 0,
            AnswerLabel::B => 1,
            AnswerLabel::C => 2,
            AnswerLabel::D => 3,
        }
    }
}

impl fmt::Display for AnswerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string is not one of the alphabet labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid answer label (expected A, B, C or D)")]
pub struct UnknownLabel(pub String);

impl FromStr for AnswerLabel {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(AnswerLabel::A),
            "B" | "b" => Ok(AnswerLabel::B),
            "C" | "c" => Ok(AnswerLabel::C),
            "D" | "d" => Ok(AnswerLabel::D),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

impl TryFrom<String> for AnswerLabel {
    type Error = UnknownLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AnswerLabel> for String {
    fn from(label: AnswerLabel) -> Self {
        label.as_str().to_string()
    }
}

/// Shape violations in a submitted answer list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerSetError {
    #[error("expected exactly {expected} answers, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("answer at index {index} has invalid label '{value}'")]
    InvalidLabel { index: usize, value: String },
}

impl AnswerSetError {
    /// Index of the offending entry, when the failure is tied to one.
    pub fn index(&self) -> Option<usize> {
        match self {
            AnswerSetError::WrongLength { .. } => None,
            AnswerSetError::InvalidLabel { index, .. } => Some(*index),
        }
    }
}

/// Exactly twenty answers, in question order.
///
/// Position decides which scoring rule applies, so the order is part of the
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<AnswerLabel>", into = "Vec<AnswerLabel>")]
pub struct AnswerSet([AnswerLabel; QUESTION_COUNT]);

impl AnswerSet {
    /// Parses raw labels, rejecting any other length or label.
    ///
    /// The length is checked first; label errors name the first bad index.
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> Result<Self, AnswerSetError> {
        if raw.len() != QUESTION_COUNT {
            return Err(AnswerSetError::WrongLength {
                expected: QUESTION_COUNT,
                actual: raw.len(),
            });
        }

        let mut labels = [AnswerLabel::A; QUESTION_COUNT];
        for (index, value) in raw.iter().enumerate() {
            labels[index] = value.as_ref().parse().map_err(|_| AnswerSetError::InvalidLabel {
                index,
                value: value.as_ref().to_string(),
            })?;
        }
        Ok(Self(labels))
    }

    /// Builds a set from already-typed labels.
    pub fn from_labels(labels: [AnswerLabel; QUESTION_COUNT]) -> Self {
        Self(labels)
    }

    /// Answers to questions 1-10.
    pub fn default_type_answers(&self) -> &[AnswerLabel] {
        &self.0[..DEFAULT_TYPE_QUESTIONS]
    }

    /// Answers to questions 11-20.
    pub fn awareness_answers(&self) -> &[AnswerLabel] {
        &self.0[DEFAULT_TYPE_QUESTIONS..]
    }

    pub fn as_slice(&self) -> &[AnswerLabel] {
        &self.0
    }
}

impl TryFrom<Vec<AnswerLabel>> for AnswerSet {
    type Error = AnswerSetError;

    fn try_from(labels: Vec<AnswerLabel>) -> Result<Self, Self::Error> {
        let actual = labels.len();
        let array: [AnswerLabel; QUESTION_COUNT] =
            labels.try_into().map_err(|_| AnswerSetError::WrongLength {
                expected: QUESTION_COUNT,
                actual,
            })?;
        Ok(Self(array))
    }
}

impl From<AnswerSet> for Vec<AnswerLabel> {
    fn from(set: AnswerSet) -> Self {
        set.0.to_vec()
    }
}
