mod messages;

pub use messages::{
    DEFAULT_HOST, DEFAULT_PORT, ErrorResponse, HealthResponse, HealthStatus, QuestionResponse,
};
