//! Scoring model - pure mapping from an answer set to a classification.
//!
//! Scoring runs in two passes over the fixed-position answer set:
//!
//! 1. Questions 1-10 each add one point to either the Architect or the
//!    Alchemist axis, according to that question's rule.
//! 2. Questions 11-20 each add one awareness point when the answer is in the
//!    question's aware set.
//!
//! The classification then applies the tie rule first and the awareness
//! threshold second. No I/O happens here.

use std::sync::Arc;

use serde::Serialize;

use super::answer::{AnswerSet, AnswerSetError, AWARENESS_QUESTIONS};
use super::dna_type::{Axis, DnaType};
use super::scoring_table::ScoringTable;
use super::subtype::SubtypeSlug;
use crate::domain::foundation::Percentage;

/// Minimum awareness for a pure Architect or Alchemist classification.
pub const AWARENESS_THRESHOLD: Percentage = Percentage::clamped(70);

/// Full scoring output, including the raw axis scores for auditing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub dominant_type: DnaType,
    pub awareness_percentage: Percentage,
    pub architect_score: u8,
    pub alchemist_score: u8,
    pub awareness_score: u8,
    pub subtype: SubtypeSlug,
}

impl Score {
    /// The axis with the strictly higher score, `None` on a tie.
    pub fn lean(&self) -> Option<Axis> {
        lean(self.architect_score, self.alchemist_score)
    }
}

fn lean(architect: u8, alchemist: u8) -> Option<Axis> {
    match architect.cmp(&alchemist) {
        std::cmp::Ordering::Greater => Some(Axis::Architect),
        std::cmp::Ordering::Less => Some(Axis::Alchemist),
        std::cmp::Ordering::Equal => None,
    }
}

/// Applies the tie rule, then the awareness threshold.
pub fn classify(architect_score: u8, alchemist_score: u8, awareness: Percentage) -> DnaType {
    match lean(architect_score, alchemist_score) {
        None => DnaType::UnfocusedPotential,
        Some(_) if !awareness.meets(AWARENESS_THRESHOLD) => DnaType::BlurredIdentity,
        Some(Axis::Architect) => DnaType::Architect,
        Some(Axis::Alchemist) => DnaType::Alchemist,
    }
}

/// Scores an already-validated answer set against `table`.
pub fn score(answers: &AnswerSet, table: &ScoringTable) -> Score {
    let mut architect_score = 0u8;
    let mut alchemist_score = 0u8;
    for (rule, label) in table
        .default_type_rules()
        .iter()
        .zip(answers.default_type_answers())
    {
        match rule.axis_for(*label) {
            Axis::Architect => architect_score += 1,
            Axis::Alchemist => alchemist_score += 1,
        }
    }

    let awareness_score = table
        .awareness_rules()
        .iter()
        .zip(answers.awareness_answers())
        .filter(|(rule, label)| rule.is_aware(**label))
        .count() as u8;

    let awareness_percentage =
        Percentage::of(u32::from(awareness_score), AWARENESS_QUESTIONS as u32);
    let dominant_type = classify(architect_score, alchemist_score, awareness_percentage);
    let subtype = SubtypeSlug::derive(
        dominant_type,
        lean(architect_score, alchemist_score),
        awareness_percentage,
    );

    Score {
        dominant_type,
        awareness_percentage,
        architect_score,
        alchemist_score,
        awareness_score,
        subtype,
    }
}

/// Scoring model bound to one scoring table.
#[derive(Debug, Clone)]
pub struct ScoringModel {
    table: Arc<ScoringTable>,
}

impl ScoringModel {
    pub fn new(table: ScoringTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    pub fn table(&self) -> &ScoringTable {
        &self.table
    }

    /// Validates raw labels and scores them.
    ///
    /// Fails with the first shape violation; nothing is coerced or truncated.
    pub fn evaluate<S: AsRef<str>>(&self, raw: &[S]) -> Result<(AnswerSet, Score), AnswerSetError> {
        let answers = AnswerSet::parse(raw)?;
        let score = self.score(&answers);
        Ok((answers, score))
    }

    pub fn score(&self, answers: &AnswerSet) -> Score {
        score(answers, &self.table)
    }
}

impl Default for ScoringModel {
    fn default() -> Self {
        Self::new(ScoringTable::standard().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::answer::AnswerLabel;
    use proptest::prelude::*;
    use proptest::sample::select;

    /// `architect` A answers then B answers, followed by `aware` A answers
    /// then C answers.
    fn answers(architect: usize, aware: usize) -> Vec<String> {
        let mut raw = Vec::with_capacity(20);
        raw.extend((0..10).map(|i| (if i < architect { "A" } else { "B" }).to_string()));
        raw.extend((0..10).map(|i| (if i < aware { "A" } else { "C" }).to_string()));
        raw
    }

    fn evaluate(raw: &[String]) -> Score {
        ScoringModel::default().evaluate(raw).unwrap().1
    }

    fn label_array() -> impl Strategy<Value = [AnswerLabel; 20]> {
        proptest::array::uniform20(select(AnswerLabel::ALL.to_vec()))
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Classification
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn all_architect_and_aware_is_architect_at_full_awareness() {
        let score = evaluate(&answers(10, 10));
        assert_eq!(score.dominant_type, DnaType::Architect);
        assert_eq!(score.awareness_percentage.value(), 100);
        assert_eq!(score.architect_score, 10);
        assert_eq!(score.alchemist_score, 0);
        assert_eq!(score.subtype, SubtypeSlug::UltimateStrategist);
    }

    #[test]
    fn architect_lean_with_ninety_percent_awareness_is_architect() {
        let score = evaluate(&answers(7, 9));
        assert_eq!(score.awareness_percentage.value(), 90);
        assert_eq!(score.dominant_type, DnaType::Architect);
    }

    #[test]
    fn threshold_is_inclusive_at_seventy() {
        let score = evaluate(&answers(6, 7));
        assert_eq!(score.awareness_percentage.value(), 70);
        assert_eq!(score.dominant_type, DnaType::Architect);
    }

    #[test]
    fn architect_lean_with_sixty_percent_awareness_is_blurred() {
        let score = evaluate(&answers(8, 6));
        assert_eq!(score.awareness_percentage.value(), 60);
        assert_eq!(score.dominant_type, DnaType::BlurredIdentity);
        assert_eq!(score.lean(), Some(Axis::Architect));
        assert_eq!(score.subtype, SubtypeSlug::Overthinker);
    }

    #[test]
    fn alchemist_lean_follows_same_threshold() {
        assert_eq!(evaluate(&answers(2, 8)).dominant_type, DnaType::Alchemist);
        assert_eq!(evaluate(&answers(2, 3)).dominant_type, DnaType::BlurredIdentity);
    }

    #[test]
    fn tie_is_unfocused_even_with_full_awareness() {
        let score = evaluate(&answers(5, 10));
        assert_eq!(score.dominant_type, DnaType::UnfocusedPotential);
        assert_eq!(score.lean(), None);
    }

    #[test]
    fn c_answers_count_toward_architect() {
        let mut raw = answers(0, 10);
        for entry in raw.iter_mut().take(6) {
            *entry = "C".to_string();
        }
        let score = evaluate(&raw);
        assert_eq!(score.architect_score, 6);
        assert_eq!(score.dominant_type, DnaType::Architect);
    }

    #[test]
    fn b_answers_count_as_aware() {
        let mut raw = answers(10, 0);
        for entry in raw.iter_mut().skip(10).take(7) {
            *entry = "B".to_string();
        }
        assert_eq!(evaluate(&raw).awareness_score, 7);
    }

    #[test]
    fn classify_applies_tie_rule_before_threshold() {
        let low = Percentage::try_new(10).unwrap();
        assert_eq!(classify(5, 5, low), DnaType::UnfocusedPotential);
        assert_eq!(classify(6, 4, low), DnaType::BlurredIdentity);
        assert_eq!(classify(4, 6, Percentage::HUNDRED), DnaType::Alchemist);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Input validation
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn evaluate_rejects_wrong_length() {
        let model = ScoringModel::default();
        let mut raw = answers(10, 10);
        raw.pop();
        assert!(matches!(
            model.evaluate(&raw),
            Err(AnswerSetError::WrongLength { actual: 19, .. })
        ));

        raw.push("A".to_string());
        raw.push("A".to_string());
        assert!(matches!(
            model.evaluate(&raw),
            Err(AnswerSetError::WrongLength { actual: 21, .. })
        ));
    }

    #[test]
    fn evaluate_rejects_unknown_label_with_index() {
        let mut raw = answers(10, 10);
        raw[4] = "E".to_string();
        let err = ScoringModel::default().evaluate(&raw).unwrap_err();
        assert_eq!(err.index(), Some(4));
    }

    #[test]
    fn custom_table_changes_per_question_mapping() {
        let yaml = format!(
            "default_type:\n{}awareness:\n{}",
            "  - architect: [D]\n".repeat(10),
            "  - aware: [C]\n".repeat(10)
        );
        let model = ScoringModel::new(ScoringTable::from_yaml_str(&yaml).unwrap());

        let raw: Vec<String> = "DDDDDDDDDDCCCCCCCCCC".chars().map(String::from).collect();
        let (_, score) = model.evaluate(&raw).unwrap();
        assert_eq!(score.dominant_type, DnaType::Architect);
        assert_eq!(score.awareness_percentage, Percentage::HUNDRED);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Properties
    // ════════════════════════════════════════════════════════════════════════════

    proptest! {
        #[test]
        fn scoring_is_deterministic(labels in label_array()) {
            let set = AnswerSet::from_labels(labels);
            let model = ScoringModel::default();
            prop_assert_eq!(model.score(&set), model.score(&set));
        }

        #[test]
        fn axis_scores_always_sum_to_ten(labels in label_array()) {
            let score = ScoringModel::default().score(&AnswerSet::from_labels(labels));
            prop_assert_eq!(score.architect_score + score.alchemist_score, 10);
            prop_assert_eq!(u32::from(score.awareness_percentage.value()), u32::from(score.awareness_score) * 10);
        }

        #[test]
        fn tied_axes_are_unfocused_regardless_of_awareness(
            order in Just((0..10).collect::<Vec<usize>>()).prop_shuffle(),
            awareness in proptest::array::uniform10(select(AnswerLabel::ALL.to_vec())),
        ) {
            let mut labels = [AnswerLabel::B; 20];
            for &question in &order[..5] {
                labels[question] = AnswerLabel::A;
            }
            labels[10..].copy_from_slice(&awareness);

            let score = ScoringModel::default().score(&AnswerSet::from_labels(labels));
            prop_assert_eq!(score.architect_score, score.alchemist_score);
            prop_assert_eq!(score.dominant_type, DnaType::UnfocusedPotential);
        }
    }
}
