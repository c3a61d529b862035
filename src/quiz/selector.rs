use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::data::LoadStatus;
use crate::models::{FormattedQuestion, QuestionRecord, QuestionSet};

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 5;
pub const DEFAULT_OPTIONS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("question data is not available: {0}")]
    ServiceUnavailable(String),
    #[error("No questions found for Unit No: {0}")]
    NotFound(String),
}

/// How a request should be answered when the source loaded without any
/// usable questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum EmptyDataResponse {
    #[default]
    Unavailable,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Total options per question, correct answer included.
    pub option_count: usize,
    /// Replace blank wrong answers with `Option k` instead of dropping them.
    pub pad_with_placeholders: bool,
    pub empty_data: EmptyDataResponse,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            option_count: DEFAULT_OPTIONS,
            pad_with_placeholders: false,
            empty_data: EmptyDataResponse::default(),
        }
    }
}

fn placeholder(column: usize) -> String {
    format!("Option {}", column + 1)
}

impl SelectorConfig {
    fn wanted_wrong_answers(&self) -> usize {
        self.option_count.clamp(MIN_OPTIONS, MAX_OPTIONS) - 1
    }

    /// Pick one question for `unit_id` and shuffle its options.
    pub fn select<R: Rng + ?Sized>(
        &self,
        unit_id: u64,
        status: &LoadStatus,
        set: &QuestionSet,
        rng: &mut R,
    ) -> Result<FormattedQuestion, SelectError> {
        let unit_id = unit_id.to_string();

        match status {
            LoadStatus::Failed(reason) => {
                return Err(SelectError::ServiceUnavailable(reason.clone()));
            }
            LoadStatus::LoadedEmpty => {
                return Err(match self.empty_data {
                    EmptyDataResponse::Unavailable => {
                        SelectError::ServiceUnavailable("question source is empty".to_string())
                    }
                    EmptyDataResponse::NotFound => SelectError::NotFound(unit_id),
                });
            }
            LoadStatus::Loaded(_) => {}
        }

        let candidates: Vec<&QuestionRecord> = set.for_unit(&unit_id).collect();
        let record = candidates
            .choose(rng)
            .ok_or_else(|| SelectError::NotFound(unit_id.clone()))?;

        Ok(self.format(record, rng))
    }

    /// Build the shuffled option list for one record.
    pub fn format<R: Rng + ?Sized>(&self, record: &QuestionRecord, rng: &mut R) -> FormattedQuestion {
        let wanted = self.wanted_wrong_answers();
        // A wrong answer repeating the correct one would show it twice.
        let usable = |answer: &String| !answer.trim().is_empty() && *answer != record.correct_answer;

        let mut wrong: Vec<String> = if self.pad_with_placeholders {
            let columns: Vec<usize> = (0..record.wrong_answers.len().max(wanted)).collect();
            columns
                .choose_multiple(rng, wanted)
                .map(|&i| match record.wrong_answers.get(i) {
                    Some(answer) if usable(answer) => answer.clone(),
                    _ => placeholder(i),
                })
                .collect()
        } else {
            let genuine: Vec<&String> = record.wrong_answers.iter().filter(|a| usable(*a)).collect();
            if genuine.is_empty() {
                (0..wanted).map(placeholder).collect()
            } else {
                genuine
                    .choose_multiple(rng, wanted.min(genuine.len()))
                    .map(|answer| (*answer).clone())
                    .collect()
            }
        };

        let mut options = Vec::with_capacity(wrong.len() + 1);
        options.push(record.correct_answer.clone());
        options.append(&mut wrong);
        options.shuffle(rng);

        FormattedQuestion {
            question_text: record.question_text.clone(),
            options,
            correct_answer: record.correct_answer.clone(),
            question_id: record.id,
        }
    }
}
