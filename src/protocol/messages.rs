//! JSON bodies returned by the HTTP API.

use serde::{Deserialize, Serialize};

use crate::data::LoadStatus;
use crate::models::FormattedQuestion;

/// Default server port.
pub const DEFAULT_PORT: u16 = 5001;

/// Default bind address.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Body of `GET /questions/unit/{unit_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub question: String,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer_debug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
}

impl QuestionResponse {
    pub fn new(question: FormattedQuestion, include_debug: bool, include_id: bool) -> Self {
        Self {
            question: question.question_text,
            options: question.options,
            correct_answer_debug: include_debug.then_some(question.correct_answer),
            question_id: include_id.then(|| question.question_id.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Ok,
    OkEmptyData,
    Error,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub message: String,
}

impl From<&LoadStatus> for HealthResponse {
    fn from(status: &LoadStatus) -> Self {
        let health = match status {
            LoadStatus::Loaded(_) => HealthStatus::Ok,
            LoadStatus::LoadedEmpty => HealthStatus::OkEmptyData,
            LoadStatus::Failed(_) => HealthStatus::Error,
        };
        Self {
            status: health,
            message: status.message(),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn question() -> FormattedQuestion {
        FormattedQuestion {
            question_text: "Q1".to_string(),
            options: vec!["B".to_string(), "A".to_string()],
            correct_answer: "A".to_string(),
            question_id: Uuid::nil(),
        }
    }

    #[test]
    fn test_question_serialization() {
        let json = serde_json::to_value(QuestionResponse::new(question(), true, true)).unwrap();
        assert_eq!(json["question"], "Q1");
        assert_eq!(json["options"], serde_json::json!(["B", "A"]));
        assert_eq!(json["correct_answer_debug"], "A");
        assert_eq!(json["question_id"], Uuid::nil().to_string());

        let json = serde_json::to_value(QuestionResponse::new(question(), false, false)).unwrap();
        assert!(json.get("correct_answer_debug").is_none());
        assert!(json.get("question_id").is_none());
    }

    #[test]
    fn test_health_serialization() {
        let json = serde_json::to_string(&HealthResponse::from(&LoadStatus::LoadedEmpty)).unwrap();
        assert!(json.contains("\"status\":\"ok_empty_data\""));

        let health = HealthResponse::from(&LoadStatus::Failed("gone".into()));
        assert_eq!(health.status, HealthStatus::Error);
        assert!(health.message.contains("gone"));
    }
}
