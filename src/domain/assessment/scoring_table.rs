//! Per-question scoring table.
//!
//! Each default-type question lists the labels that lean Architect (every
//! other label leans Alchemist). Each awareness question lists the labels
//! that count as aware. The table is data, so the per-question mapping can be
//! audited and replaced without touching the scoring rules.
//!
//! ```yaml
//! default_type:
//!   - architect: [A, C]   # question 1
//!   # ... 10 entries
//! awareness:
//!   - aware: [A, B]       # question 11
//!   # ... 10 entries
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::answer::{AnswerLabel, AWARENESS_QUESTIONS, DEFAULT_TYPE_QUESTIONS};
use super::dna_type::Axis;

/// Compact set of answer labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<AnswerLabel>", into = "Vec<AnswerLabel>")]
pub struct LabelSet(u8);

impl LabelSet {
    pub fn of(labels: &[AnswerLabel]) -> Self {
        labels.iter().fold(Self(0), |set, label| set.with(*label))
    }

    pub fn with(self, label: AnswerLabel) -> Self {
        Self(self.0 | (1 << label.ordinal()))
    }

    pub fn contains(&self, label: AnswerLabel) -> bool {
        self.0 & (1 << label.ordinal()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn labels(&self) -> Vec<AnswerLabel> {
        AnswerLabel::ALL
            .iter()
            .copied()
            .filter(|label| self.contains(*label))
            .collect()
    }
}

impl From<Vec<AnswerLabel>> for LabelSet {
    fn from(labels: Vec<AnswerLabel>) -> Self {
        Self::of(&labels)
    }
}

impl From<LabelSet> for Vec<AnswerLabel> {
    fn from(set: LabelSet) -> Self {
        set.labels()
    }
}

/// Scoring rule for one default-type question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultTypeRule {
    /// Labels that count toward the Architect axis.
    pub architect: LabelSet,
}

impl DefaultTypeRule {
    pub fn axis_for(&self, label: AnswerLabel) -> Axis {
        if self.architect.contains(label) {
            Axis::Architect
        } else {
            Axis::Alchemist
        }
    }
}

/// Scoring rule for one awareness question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwarenessRule {
    /// Labels that count as aware of the opposite style.
    pub aware: LabelSet,
}

impl AwarenessRule {
    pub fn is_aware(&self, label: AnswerLabel) -> bool {
        self.aware.contains(label)
    }
}

/// Errors raised while loading a scoring table.
#[derive(Debug, Error)]
pub enum ScoringTableError {
    #[error("failed to read scoring table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scoring table: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{block} block must have exactly {expected} questions, got {actual}")]
    WrongQuestionCount {
        block: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{block} question {question} lists no labels")]
    EmptyRule { block: &'static str, question: usize },
}

/// The full per-question table for one questionnaire version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringTable {
    default_type: Vec<DefaultTypeRule>,
    awareness: Vec<AwarenessRule>,
}

static STANDARD: Lazy<ScoringTable> = Lazy::new(|| {
    let architect = LabelSet::of(&[AnswerLabel::A, AnswerLabel::C]);
    let aware = LabelSet::of(&[AnswerLabel::A, AnswerLabel::B]);
    ScoringTable {
        default_type: vec![DefaultTypeRule { architect }; DEFAULT_TYPE_QUESTIONS],
        awareness: vec![AwarenessRule { aware }; AWARENESS_QUESTIONS],
    }
});

impl ScoringTable {
    /// Table for the production question bank.
    ///
    /// Answer options are ordered so that A/C lean Architect on every
    /// default-type question and A/B are the aware options on every
    /// awareness question.
    pub fn standard() -> &'static ScoringTable {
        &STANDARD
    }

    /// Builds a table, checking the question counts and that no rule is empty.
    ///
    /// Only awareness rules must be non-empty: a default-type rule with no
    /// Architect labels is a legitimate all-Alchemist question.
    pub fn new(
        default_type: Vec<DefaultTypeRule>,
        awareness: Vec<AwarenessRule>,
    ) -> Result<Self, ScoringTableError> {
        let table = Self {
            default_type,
            awareness,
        };
        table.validate()?;
        Ok(table)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ScoringTableError> {
        let table: ScoringTable = serde_yaml::from_str(yaml)?;
        table.validate()?;
        Ok(table)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScoringTableError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ScoringTableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn to_yaml(&self) -> Result<String, ScoringTableError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Rule for default-type question `index` (0-based within the block).
    pub fn default_type_rule(&self, index: usize) -> Option<&DefaultTypeRule> {
        self.default_type.get(index)
    }

    /// Rule for awareness question `index` (0-based within the block).
    pub fn awareness_rule(&self, index: usize) -> Option<&AwarenessRule> {
        self.awareness.get(index)
    }

    pub fn default_type_rules(&self) -> &[DefaultTypeRule] {
        &self.default_type
    }

    pub fn awareness_rules(&self) -> &[AwarenessRule] {
        &self.awareness
    }

    fn validate(&self) -> Result<(), ScoringTableError> {
        if self.default_type.len() != DEFAULT_TYPE_QUESTIONS {
            return Err(ScoringTableError::WrongQuestionCount {
                block: "default_type",
                expected: DEFAULT_TYPE_QUESTIONS,
                actual: self.default_type.len(),
            });
        }
        if self.awareness.len() != AWARENESS_QUESTIONS {
            return Err(ScoringTableError::WrongQuestionCount {
                block: "awareness",
                expected: AWARENESS_QUESTIONS,
                actual: self.awareness.len(),
            });
        }
        if let Some(question) = self.awareness.iter().position(|rule| rule.aware.is_empty()) {
            return Err(ScoringTableError::EmptyRule {
                block: "awareness",
                question: DEFAULT_TYPE_QUESTIONS + question + 1,
            });
        }
        Ok(())
    }
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self::standard().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn yaml_with(default_count: usize, awareness_count: usize) -> String {
        let mut yaml = String::from("default_type:\n");
        for _ in 0..default_count {
            yaml.push_str("  - architect: [A, C]\n");
        }
        yaml.push_str("awareness:\n");
        for _ in 0..awareness_count {
            yaml.push_str("  - aware: [A, B]\n");
        }
        yaml
    }

    #[test]
    fn label_set_membership() {
        let set = LabelSet::of(&[AnswerLabel::B, AnswerLabel::D]);
        assert!(set.contains(AnswerLabel::B));
        assert!(set.contains(AnswerLabel::D));
        assert!(!set.contains(AnswerLabel::A));
        assert_eq!(set.labels(), vec![AnswerLabel::B, AnswerLabel::D]);
    }

    #[test]
    fn standard_table_counts_a_and_c_as_architect() {
        let table = ScoringTable::standard();
        for rule in table.default_type_rules() {
            assert_eq!(rule.axis_for(AnswerLabel::A), Axis::Architect);
            assert_eq!(rule.axis_for(AnswerLabel::B), Axis::Alchemist);
            assert_eq!(rule.axis_for(AnswerLabel::C), Axis::Architect);
            assert_eq!(rule.axis_for(AnswerLabel::D), Axis::Alchemist);
        }
    }

    #[test]
    fn standard_table_counts_a_and_b_as_aware() {
        let table = ScoringTable::standard();
        for rule in table.awareness_rules() {
            assert!(rule.is_aware(AnswerLabel::A));
            assert!(rule.is_aware(AnswerLabel::B));
            assert!(!rule.is_aware(AnswerLabel::C));
            assert!(!rule.is_aware(AnswerLabel::D));
        }
    }

    #[test]
    fn yaml_rules_are_per_question() {
        let mut yaml = String::from("default_type:\n  - architect: [B]\n");
        for _ in 1..10 {
            yaml.push_str("  - architect: [A, C]\n");
        }
        yaml.push_str("awareness:\n");
        for _ in 0..10 {
            yaml.push_str("  - aware: [D]\n");
        }

        let table = ScoringTable::from_yaml_str(&yaml).unwrap();
        let first = table.default_type_rule(0).unwrap();
        assert_eq!(first.axis_for(AnswerLabel::B), Axis::Architect);
        assert_eq!(first.axis_for(AnswerLabel::A), Axis::Alchemist);
        assert_eq!(
            table.default_type_rule(1).unwrap().axis_for(AnswerLabel::A),
            Axis::Architect
        );
        assert!(table.awareness_rule(9).unwrap().is_aware(AnswerLabel::D));
        assert!(table.default_type_rule(10).is_none());
    }

    #[test]
    fn yaml_with_wrong_block_size_is_rejected() {
        let err = ScoringTable::from_yaml_str(&yaml_with(9, 10)).unwrap_err();
        assert!(matches!(
            err,
            ScoringTableError::WrongQuestionCount { block: "default_type", actual: 9, .. }
        ));

        let err = ScoringTable::from_yaml_str(&yaml_with(10, 11)).unwrap_err();
        assert!(matches!(
            err,
            ScoringTableError::WrongQuestionCount { block: "awareness", actual: 11, .. }
        ));
    }

    #[test]
    fn yaml_with_unknown_label_is_rejected() {
        let yaml = yaml_with(10, 10).replacen("[A, C]", "[A, X]", 1);
        assert!(matches!(
            ScoringTable::from_yaml_str(&yaml),
            Err(ScoringTableError::Parse(_))
        ));
    }

    #[test]
    fn empty_awareness_rule_is_rejected() {
        let yaml = yaml_with(10, 10).replacen("[A, B]", "[]", 1);
        assert!(matches!(
            ScoringTable::from_yaml_str(&yaml),
            Err(ScoringTableError::EmptyRule { block: "awareness", question: 11 })
        ));
    }

    #[test]
    fn standard_table_survives_yaml_export() {
        let yaml = ScoringTable::standard().to_yaml().unwrap();
        let parsed = ScoringTable::from_yaml_str(&yaml).unwrap();
        assert_eq!(&parsed, ScoringTable::standard());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml_with(10, 10).as_bytes()).unwrap();

        let table = ScoringTable::from_path(file.path()).unwrap();
        assert_eq!(&table, ScoringTable::standard());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ScoringTable::from_path("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }
}
