use std::collections::HashSet;

use clap::ValueEnum;
use thiserror::Error;

/// How strictly a source row is checked before it becomes a question.
///
/// Each level includes every check of the levels before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, ValueEnum)]
pub enum ValidationPolicy {
    /// Only the unit id must be present.
    Minimal,
    /// Question, correct answer and the first wrong answer must be present.
    Moderate,
    /// Every configured wrong-answer column must be present.
    #[default]
    Strict,
    /// Wrong answers must also be distinct from each other and from the
    /// correct answer.
    StrictDistinct,
}

/// Why a row was skipped during loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowRejection {
    #[error("missing value for '{0}'")]
    MissingField(&'static str),
    #[error("only {found} distinct wrong answers, {required} required")]
    TooFewDistinct { found: usize, required: usize },
    #[error("malformed row: {0}")]
    Malformed(String),
}

/// The textual fields of one row, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub unit_id: String,
    pub question_text: String,
    pub correct_answer: String,
    pub wrong_answers: Vec<String>,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl ValidationPolicy {
    /// Check a row, returning the wrong answers that should be stored.
    ///
    /// `wrong_columns` names the wrong-answer columns in order and is used for
    /// reporting. Under `StrictDistinct` the returned answers are deduplicated.
    pub fn validate(
        self,
        row: &RawRow,
        wrong_columns: &[&'static str],
    ) -> Result<Vec<String>, RowRejection> {
        if is_blank(&row.unit_id) {
            return Err(RowRejection::MissingField(super::loader::UNIT_COLUMN));
        }
        if self == ValidationPolicy::Minimal {
            return Ok(row.wrong_answers.clone());
        }

        if is_blank(&row.question_text) {
            return Err(RowRejection::MissingField(super::loader::QUESTION_COLUMN));
        }
        if is_blank(&row.correct_answer) {
            return Err(RowRejection::MissingField(super::loader::CORRECT_COLUMN));
        }

        let required = if self == ValidationPolicy::Moderate {
            1
        } else {
            wrong_columns.len()
        };
        for (answer, column) in row.wrong_answers.iter().zip(wrong_columns).take(required) {
            if is_blank(answer) {
                return Err(RowRejection::MissingField(*column));
            }
        }

        if self != ValidationPolicy::StrictDistinct {
            return Ok(row.wrong_answers.clone());
        }

        let mut seen = HashSet::new();
        let distinct: Vec<String> = row
            .wrong_answers
            .iter()
            .filter(|answer| **answer != row.correct_answer)
            .filter(|answer| seen.insert(answer.as_str()))
            .cloned()
            .collect();

        if distinct.len() < wrong_columns.len() {
            return Err(RowRejection::TooFewDistinct {
                found: distinct.len(),
                required: wrong_columns.len(),
            });
        }

        Ok(distinct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WRONG: [&str; 4] = ["Wrong Answer 1", "Wrong Answer 2", "Wrong Answer 3", "Wrong Answer 4"];

    fn row(unit: &str, question: &str, correct: &str, wrong: [&str; 4]) -> RawRow {
        RawRow {
            unit_id: unit.to_string(),
            question_text: question.to_string(),
            correct_answer: correct.to_string(),
            wrong_answers: wrong.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_minimal_only_needs_unit() {
        let r = row("3", "", "", ["", "", "", ""]);
        assert_eq!(ValidationPolicy::Minimal.validate(&r, &WRONG).unwrap().len(), 4);

        let r = row("  ", "Q", "A", ["B", "C", "D", "E"]);
        assert_eq!(
            ValidationPolicy::Minimal.validate(&r, &WRONG),
            Err(RowRejection::MissingField("Unit No"))
        );
    }

    #[test]
    fn test_moderate_needs_first_wrong_answer() {
        let r = row("1", "Q", "A", ["B", "", "", ""]);
        assert!(ValidationPolicy::Moderate.validate(&r, &WRONG).is_ok());

        let r = row("1", "Q", "A", ["", "C", "D", "E"]);
        assert_eq!(
            ValidationPolicy::Moderate.validate(&r, &WRONG),
            Err(RowRejection::MissingField("Wrong Answer 1"))
        );

        let r = row("1", "Q", " ", ["B", "C", "D", "E"]);
        assert_eq!(
            ValidationPolicy::Moderate.validate(&r, &WRONG),
            Err(RowRejection::MissingField("Correct Answer"))
        );
    }

    #[test]
    fn test_strict_needs_every_wrong_answer() {
        let r = row("1", "Q", "A", ["B", "C", "", "E"]);
        assert_eq!(
            ValidationPolicy::Strict.validate(&r, &WRONG),
            Err(RowRejection::MissingField("Wrong Answer 3"))
        );
        assert!(ValidationPolicy::Strict.validate(&r, &WRONG[..2]).is_ok());

        // Duplicates are tolerated below strict-distinct.
        let r = row("1", "Q", "A", ["A", "B", "B", "C"]);
        assert!(ValidationPolicy::Strict.validate(&r, &WRONG).is_ok());
    }

    #[test]
    fn test_strict_distinct() {
        let r = row("1", "Q", "A", ["B", "C", "D", "E"]);
        assert_eq!(
            ValidationPolicy::StrictDistinct.validate(&r, &WRONG).unwrap(),
            vec!["B", "C", "D", "E"]
        );

        let r = row("1", "Q", "A", ["B", "C", "C", "E"]);
        assert_eq!(
            ValidationPolicy::StrictDistinct.validate(&r, &WRONG),
            Err(RowRejection::TooFewDistinct { found: 3, required: 4 })
        );

        let r = row("1", "Q", "A", ["B", "A", "D", "E"]);
        assert_eq!(
            ValidationPolicy::StrictDistinct.validate(&r, &WRONG),
            Err(RowRejection::TooFewDistinct { found: 3, required: 4 })
        );

        // Comparison is case sensitive.
        let r = row("1", "Q", "A", ["a", "B", "b", "C"]);
        assert!(ValidationPolicy::StrictDistinct.validate(&r, &WRONG).is_ok());
    }

    #[test]
    fn test_policies_are_ordered() {
        assert!(ValidationPolicy::Minimal < ValidationPolicy::Moderate);
        assert!(ValidationPolicy::Strict < ValidationPolicy::StrictDistinct);
        assert_eq!(ValidationPolicy::default(), ValidationPolicy::Strict);
    }
}
