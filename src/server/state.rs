//! State shared by every request handler.
//!
//! Built once before the server starts and never written afterwards, so
//! handlers read it without locking.

use crate::data::{LoadReport, LoadStatus};
use crate::models::QuestionSet;
use crate::quiz::SelectorConfig;

/// Which optional fields go into question responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseFields {
    pub correct_answer_debug: bool,
    pub question_id: bool,
}

impl Default for ResponseFields {
    fn default() -> Self {
        Self {
            correct_answer_debug: true,
            question_id: true,
        }
    }
}

pub struct QuizState {
    /// Loaded questions.
    pub questions: QuestionSet,
    /// Outcome of the startup load.
    pub status: LoadStatus,
    pub selector: SelectorConfig,
    pub fields: ResponseFields,
}

impl QuizState {
    pub fn new(report: LoadReport, selector: SelectorConfig, fields: ResponseFields) -> Self {
        Self {
            questions: report.set,
            status: report.status,
            selector,
            fields,
        }
    }
}
