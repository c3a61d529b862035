//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::data::{DEFAULT_QUESTIONS_PATH, Loader, SourceEncoding, ValidationPolicy, WRONG_COLUMNS};
use crate::protocol::{DEFAULT_HOST, DEFAULT_PORT};
use crate::quiz::{DEFAULT_OPTIONS, EmptyDataResponse, MAX_OPTIONS, MIN_OPTIONS, SelectorConfig};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--wrong-answers must be between 1 and {max}, got {value}")]
    WrongAnswerColumns { value: usize, max: usize },
    #[error("--options must be between {min} and {max}, got {value}")]
    OptionCount { value: usize, min: usize, max: usize },
    #[error("at least one encoding must be given")]
    NoEncodings,
}

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Serves random multiple-choice questions per unit", long_about = None)]
pub struct Config {
    /// CSV file to load the questions from
    #[arg(short, long, env = "QUIZ_QUESTIONS", default_value = DEFAULT_QUESTIONS_PATH)]
    pub questions: PathBuf,

    /// Address to bind to
    #[arg(long, env = "QUIZ_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "QUIZ_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Row validation applied while loading
    #[arg(long, env = "QUIZ_POLICY", value_enum, default_value_t = ValidationPolicy::Strict)]
    pub policy: ValidationPolicy,

    /// Number of wrong-answer columns the source must have
    #[arg(long, env = "QUIZ_WRONG_ANSWERS", default_value_t = WRONG_COLUMNS.len())]
    pub wrong_answers: usize,

    /// Options per question, correct answer included
    #[arg(short, long, env = "QUIZ_OPTIONS", default_value_t = DEFAULT_OPTIONS)]
    pub options: usize,

    /// Replace blank wrong answers with placeholders instead of dropping them
    #[arg(long)]
    pub pad_options: bool,

    /// Encodings to try, in order
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = crate::data::DEFAULT_ENCODINGS
    )]
    pub encodings: Vec<SourceEncoding>,

    /// Response to question requests when the source has no usable rows
    #[arg(long, value_enum, default_value_t = EmptyDataResponse::Unavailable)]
    pub empty_data: EmptyDataResponse,

    /// Leave `correct_answer_debug` out of responses
    #[arg(long)]
    pub hide_debug_answer: bool,

    /// Leave `question_id` out of responses
    #[arg(long)]
    pub hide_question_id: bool,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=WRONG_COLUMNS.len()).contains(&self.wrong_answers) {
            return Err(ConfigError::WrongAnswerColumns {
                value: self.wrong_answers,
                max: WRONG_COLUMNS.len(),
            });
        }
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&self.options) {
            return Err(ConfigError::OptionCount {
                value: self.options,
                min: MIN_OPTIONS,
                max: MAX_OPTIONS,
            });
        }
        if self.encodings.is_empty() {
            return Err(ConfigError::NoEncodings);
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn loader(&self) -> Loader {
        Loader::new(self.policy, self.wrong_answers).with_encodings(self.encodings.clone())
    }

    pub fn selector(&self) -> SelectorConfig {
        SelectorConfig {
            option_count: self.options,
            pad_with_placeholders: self.pad_options,
            empty_data: self.empty_data,
        }
    }
}
