//! Loading the question source.
//!
//! ```text
//!  questions.csv (bytes)
//!        │  try each SourceEncoding in order
//!        ▼
//!   header check ── HeaderMismatch ──► next encoding
//!        │
//!        ▼
//!   ValidationPolicy per row ── RowRejection ──► row skipped, logged
//!        │
//!        ▼
//!   QuestionSet + LoadStatus
//! ```

mod encoding;
mod loader;
mod policy;

pub use encoding::{DEFAULT_ENCODINGS, SourceEncoding};
pub use loader::{
    CORRECT_COLUMN, DEFAULT_QUESTIONS_PATH, LoadError, LoadReport, LoadStatus, Loader,
    QUESTION_COLUMN, UNIT_COLUMN, WRONG_COLUMNS,
};
pub use policy::{RawRow, RowRejection, ValidationPolicy};
