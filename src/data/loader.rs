use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use thiserror::Error;

use crate::models::{QuestionRecord, QuestionSet};

use super::encoding::{DEFAULT_ENCODINGS, SourceEncoding};
use super::policy::{RawRow, RowRejection, ValidationPolicy};

pub const UNIT_COLUMN: &str = "Unit No";
pub const QUESTION_COLUMN: &str = "Question";
pub const CORRECT_COLUMN: &str = "Correct Answer";
pub static WRONG_COLUMNS: [&str; 4] = [
    "Wrong Answer 1",
    "Wrong Answer 2",
    "Wrong Answer 3",
    "Wrong Answer 4",
];

pub const DEFAULT_QUESTIONS_PATH: &str = "questions.csv";

/// Errors that prevent a source from producing any questions.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("question source '{}' was not found", .0.display())]
    SourceNotFound(PathBuf),
    #[error("failed to read question source: {0}")]
    Io(#[from] io::Error),
    #[error("source is not valid {0}")]
    Decode(SourceEncoding),
    /// Also returned once every configured encoding has been tried, for the
    /// last encoding that decoded.
    #[error("source decoded as {encoding} is missing required headers, found: {found:?}")]
    HeaderMismatch {
        encoding: SourceEncoding,
        found: Vec<String>,
    },
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("no encodings configured")]
    NoEncodings,
}

/// Outcome of the startup load, kept for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded(usize),
    LoadedEmpty,
    Failed(String),
}

impl LoadStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadStatus::Failed(_))
    }

    pub fn message(&self) -> String {
        match self {
            LoadStatus::Loaded(n) => format!("Loaded {} questions", n),
            LoadStatus::LoadedEmpty => "Question source loaded but contains no usable questions".to_string(),
            LoadStatus::Failed(reason) => format!("Questions could not be loaded: {}", reason),
        }
    }
}

/// Everything the startup load produced.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub set: QuestionSet,
    pub status: LoadStatus,
    /// Encoding the source was accepted under, if any.
    pub encoding: Option<SourceEncoding>,
    /// Number of data rows rejected by validation.
    pub skipped: usize,
}

/// Reads a tabular question source into a `QuestionSet`.
#[derive(Debug, Clone)]
pub struct Loader {
    pub policy: ValidationPolicy,
    /// Number of wrong-answer columns, between 1 and 4.
    pub wrong_answer_columns: usize,
    /// Encodings tried in order. The first one that decodes and has the
    /// required headers wins.
    pub encodings: Vec<SourceEncoding>,
}

impl Default for Loader {
    fn default() -> Self {
        Self {
            policy: ValidationPolicy::default(),
            wrong_answer_columns: WRONG_COLUMNS.len(),
            encodings: DEFAULT_ENCODINGS.to_vec(),
        }
    }
}

/// Column positions of the required headers.
struct ColumnIndex {
    unit: usize,
    question: usize,
    correct: usize,
    wrong: Vec<usize>,
}

impl Loader {
    pub fn new(policy: ValidationPolicy, wrong_answer_columns: usize) -> Self {
        Self {
            policy,
            wrong_answer_columns: wrong_answer_columns.clamp(1, WRONG_COLUMNS.len()),
            ..Self::default()
        }
    }

    pub fn with_encodings(mut self, encodings: Vec<SourceEncoding>) -> Self {
        self.encodings = encodings;
        self
    }

    fn wrong_columns(&self) -> &'static [&'static str] {
        &WRONG_COLUMNS[..self.wrong_answer_columns.clamp(1, WRONG_COLUMNS.len())]
    }

    /// Header names a source must contain.
    pub fn required_headers(&self) -> Vec<&'static str> {
        let mut headers = vec![UNIT_COLUMN, QUESTION_COLUMN, CORRECT_COLUMN];
        headers.extend_from_slice(self.wrong_columns());
        headers
    }

    /// Load `path`, recording any failure in the returned status instead of
    /// returning an error.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> LoadReport {
        let path = path.as_ref();
        let result = match fs::read(path) {
            Ok(bytes) => self.try_load_bytes(&bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(LoadError::SourceNotFound(path.to_path_buf()))
            }
            Err(err) => Err(LoadError::Io(err)),
        };
        self.report(path.display().to_string(), result)
    }

    /// Same as `load`, for a source already in memory.
    pub fn load_bytes(&self, bytes: &[u8]) -> LoadReport {
        self.report("<memory>".to_string(), self.try_load_bytes(bytes))
    }

    fn report(
        &self,
        source: String,
        result: Result<(QuestionSet, SourceEncoding, usize), LoadError>,
    ) -> LoadReport {
        match result {
            Ok((set, encoding, skipped)) => {
                let status = if set.is_empty() {
                    info!(
                        "Question source '{}' loaded with encoding {} but is empty; {} rows skipped",
                        source, encoding, skipped
                    );
                    LoadStatus::LoadedEmpty
                } else {
                    info!(
                        "Loaded {} questions from '{}' with encoding {}; {} rows skipped",
                        set.len(),
                        source,
                        encoding,
                        skipped
                    );
                    LoadStatus::Loaded(set.len())
                };
                LoadReport {
                    set,
                    status,
                    encoding: Some(encoding),
                    skipped,
                }
            }
            Err(err) => {
                error!("Failed to load question source '{}': {}", source, err);
                LoadReport {
                    set: QuestionSet::default(),
                    status: LoadStatus::Failed(err.to_string()),
                    encoding: None,
                    skipped: 0,
                }
            }
        }
    }

    /// Try each configured encoding in order.
    ///
    /// Returns the accepted records, the encoding used and the number of
    /// rows skipped by validation.
    pub fn try_load_bytes(
        &self,
        bytes: &[u8],
    ) -> Result<(QuestionSet, SourceEncoding, usize), LoadError> {
        let mut mismatch = None;
        let mut last = None;

        for &encoding in &self.encodings {
            match self.parse_with(bytes, encoding) {
                Ok((set, skipped)) => return Ok((set, encoding, skipped)),
                Err(err @ LoadError::HeaderMismatch { .. }) => {
                    warn!("{}", err);
                    mismatch = Some(err);
                }
                Err(err @ (LoadError::Decode(_) | LoadError::Csv(_))) => {
                    warn!("{}", err);
                    last = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(mismatch.or(last).unwrap_or(LoadError::NoEncodings))
    }

    fn parse_with(
        &self,
        bytes: &[u8],
        encoding: SourceEncoding,
    ) -> Result<(QuestionSet, usize), LoadError> {
        let text = encoding.decode(bytes).ok_or(LoadError::Decode(encoding))?;

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        // csv drops a leading BOM on its own; only utf-8-sig may accept one.
        if encoding != SourceEncoding::Utf8Sig && text.starts_with('\u{feff}') {
            if let Some(first) = headers.first_mut() {
                first.insert(0, '\u{feff}');
            }
        }
        let columns = self.index_columns(&headers).ok_or_else(|| LoadError::HeaderMismatch {
            encoding,
            found: headers.clone(),
        })?;

        let wrong_columns = self.wrong_columns();
        let mut records = Vec::new();
        let mut skipped = 0;

        for (i, row) in reader.records().enumerate() {
            // Header is line 1.
            let line = i + 2;
            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    warn!("Skipping row {}: {}", line, RowRejection::Malformed(err.to_string()));
                    skipped += 1;
                    continue;
                }
            };

            let field = |idx: usize| row.get(idx).unwrap_or("").to_string();
            let raw = RawRow {
                unit_id: field(columns.unit),
                question_text: field(columns.question),
                correct_answer: field(columns.correct),
                wrong_answers: columns.wrong.iter().map(|&idx| field(idx)).collect(),
            };

            match self.policy.validate(&raw, wrong_columns) {
                Ok(wrong_answers) => records.push(QuestionRecord::new(
                    raw.unit_id,
                    raw.question_text,
                    raw.correct_answer,
                    wrong_answers,
                )),
                Err(reason) => {
                    warn!("Skipping row {}: {}", line, reason);
                    skipped += 1;
                }
            }
        }

        Ok((QuestionSet::new(records), skipped))
    }

    fn index_columns(&self, headers: &[String]) -> Option<ColumnIndex> {
        let position = |name: &str| headers.iter().position(|h| h == name);
        Some(ColumnIndex {
            unit: position(UNIT_COLUMN)?,
            question: position(QUESTION_COLUMN)?,
            correct: position(CORRECT_COLUMN)?,
            wrong: self
                .wrong_columns()
                .iter()
                .map(|name| position(name))
                .collect::<Option<Vec<_>>>()?,
        })
    }
}
