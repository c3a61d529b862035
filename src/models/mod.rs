mod question;

pub use question::{FormattedQuestion, QuestionRecord, QuestionSet};
