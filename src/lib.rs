//! # unit-quiz
//!
//! Serves random multiple-choice questions, grouped by unit, over HTTP.
//!
//! Questions are read once at startup from a CSV file with the columns
//! `Unit No`, `Question`, `Correct Answer` and `Wrong Answer 1..4`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use unit_quiz::{Loader, QuizError, QuizState, ResponseFields, SelectorConfig};
//!
//! #[actix_web::main]
//! async fn main() -> Result<(), QuizError> {
//!     let report = Loader::default().load("questions.csv");
//!     let state = QuizState::new(report, SelectorConfig::default(), ResponseFields::default());
//!
//!     unit_quiz::server::run("127.0.0.1:5001", state).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
mod data;
mod models;
pub mod protocol;
mod quiz;
pub mod server;

use std::io;

use thiserror::Error;

pub use config::{Config, ConfigError};
pub use data::{
    DEFAULT_ENCODINGS, LoadError, LoadReport, LoadStatus, Loader, RawRow, RowRejection,
    SourceEncoding, ValidationPolicy,
};
pub use models::{FormattedQuestion, QuestionRecord, QuestionSet};
pub use quiz::{EmptyDataResponse, SelectError, SelectorConfig};
pub use server::{QuizState, ResponseFields};

/// Error type for running the quiz service.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("server error: {0}")]
    Io(#[from] io::Error),
}

/// Load the configured source and serve it until shutdown.
///
/// A failed load does not stop the server; it is reported through
/// `/health` and every question request answers 503.
pub async fn run(config: Config) -> Result<(), QuizError> {
    config.validate()?;

    let loader = config.loader();
    log::debug!("Required columns: {:?}", loader.required_headers());

    let report = loader.load(&config.questions);
    let fields = ResponseFields {
        correct_answer_debug: !config.hide_debug_answer,
        question_id: !config.hide_question_id,
    };
    let state = QuizState::new(report, config.selector(), fields);

    server::run(&config.bind_addr(), state).await?;
    Ok(())
}
