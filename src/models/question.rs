use uuid::Uuid;

/// One accepted row of the question source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    pub id: Uuid,
    pub unit_id: String,
    pub question_text: String,
    pub correct_answer: String,
    /// Wrong-answer columns in header order. Entries may be blank under
    /// lenient validation policies.
    pub wrong_answers: Vec<String>,
}

impl QuestionRecord {
    pub fn new(
        unit_id: String,
        question_text: String,
        correct_answer: String,
        wrong_answers: Vec<String>,
    ) -> Self {
        let id = derive_question_id(&unit_id, &question_text);
        Self {
            id,
            unit_id,
            question_text,
            correct_answer,
            wrong_answers,
        }
    }
}

/// The same unit and question text always map to the same id.
fn derive_question_id(unit_id: &str, question_text: &str) -> Uuid {
    let name = format!("{}\u{1f}{}", unit_id, question_text);
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
}

/// Every record accepted at startup. Never mutated after loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSet {
    records: Vec<QuestionRecord>,
}

impl QuestionSet {
    pub fn new(records: Vec<QuestionRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    /// Records whose unit id matches exactly, as text.
    pub fn for_unit<'a>(&'a self, unit_id: &'a str) -> impl Iterator<Item = &'a QuestionRecord> + 'a {
        self.records.iter().filter(move |r| r.unit_id == unit_id)
    }
}

/// A question ready to be sent to a client, built fresh per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedQuestion {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub question_id: Uuid,
}
