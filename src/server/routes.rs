use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, get, web};
use log::{debug, warn};

use crate::protocol::{ErrorResponse, HealthResponse, QuestionResponse};
use crate::quiz::SelectError;

use super::state::QuizState;

impl ResponseError for SelectError {
    fn status_code(&self) -> StatusCode {
        match self {
            SelectError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            SelectError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            SelectError::ServiceUnavailable(_) => "service_unavailable",
            SelectError::NotFound(_) => "not_found",
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error.to_string(),
            message: self.to_string(),
        })
    }
}

/// Return one random question for a unit.
#[get("/questions/unit/{unit_id}")]
async fn question_for_unit(
    state: web::Data<QuizState>,
    path: web::Path<u64>,
) -> Result<web::Json<QuestionResponse>, SelectError> {
    let unit_id = path.into_inner();

    let question = state
        .selector
        .select(unit_id, &state.status, &state.questions, &mut rand::thread_rng())
        .inspect_err(|err| match err {
            SelectError::ServiceUnavailable(_) => warn!("Unit {}: {}", unit_id, err),
            SelectError::NotFound(_) => debug!("{}", err),
        })?;

    debug!("Unit {}: serving question {}", unit_id, question.question_id);

    Ok(web::Json(QuestionResponse::new(
        question,
        state.fields.correct_answer_debug,
        state.fields.question_id,
    )))
}

#[get("/health")]
async fn health(state: web::Data<QuizState>) -> HttpResponse {
    let body = HealthResponse::from(&state.status);
    if state.status.is_failed() {
        HttpResponse::ServiceUnavailable().json(body)
    } else {
        HttpResponse::Ok().json(body)
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(question_for_unit).service(health);
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test};

    use crate::data::Loader;
    use crate::protocol::HealthStatus;
    use crate::quiz::{EmptyDataResponse, SelectorConfig};
    use crate::server::state::ResponseFields;

    use super::*;

    const HEADER: &str =
        "Unit No,Question,Correct Answer,Wrong Answer 1,Wrong Answer 2,Wrong Answer 3,Wrong Answer 4\n";

    fn state_from(source: &str, selector: SelectorConfig) -> web::Data<QuizState> {
        let report = Loader::default().load_bytes(source.as_bytes());
        web::Data::new(QuizState::new(report, selector, ResponseFields::default()))
    }

    fn five_options() -> SelectorConfig {
        SelectorConfig {
            option_count: 5,
            ..SelectorConfig::default()
        }
    }

    #[actix_web::test]
    async fn test_question_for_unit() {
        let source = format!("{}1,Q1,A,B,C,D,E\n", HEADER);
        let app = test::init_service(
            App::new()
                .app_data(state_from(&source, five_options()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/questions/unit/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: QuestionResponse = test::read_body_json(resp).await;
        assert_eq!(body.question, "Q1");
        assert_eq!(body.correct_answer_debug.as_deref(), Some("A"));
        assert!(body.question_id.is_some());
        let mut options = body.options;
        options.sort();
        assert_eq!(options, vec!["A", "B", "C", "D", "E"]);
    }

    #[actix_web::test]
    async fn test_unknown_unit_is_404() {
        let source = format!("{}1,Q1,A,B,C,D,E\n", HEADER);
        let app = test::init_service(
            App::new()
                .app_data(state_from(&source, SelectorConfig::default()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/questions/unit/2").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "not_found");
        assert_eq!(body.message, "No questions found for Unit No: 2");

        let req = test::TestRequest::get().uri("/questions/unit/abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_empty_source() {
        let app = test::init_service(
            App::new()
                .app_data(state_from(HEADER, SelectorConfig::default()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: HealthResponse = test::read_body_json(resp).await;
        assert_eq!(body.status, HealthStatus::OkEmptyData);

        let req = test::TestRequest::get().uri("/questions/unit/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let selector = SelectorConfig {
            empty_data: EmptyDataResponse::NotFound,
            ..SelectorConfig::default()
        };
        let app = test::init_service(
            App::new()
                .app_data(state_from(HEADER, selector))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::get().uri("/questions/unit/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_missing_source() {
        let report = Loader::default().load("no/such/questions.csv");
        let state = web::Data::new(QuizState::new(
            report,
            SelectorConfig::default(),
            ResponseFields::default(),
        ));
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: HealthResponse = test::read_body_json(resp).await;
        assert_eq!(body.status, HealthStatus::Error);

        for unit in [1, 2, 99] {
            let req = test::TestRequest::get()
                .uri(&format!("/questions/unit/{}", unit))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        }
    }

    #[actix_web::test]
    async fn test_optional_fields_can_be_hidden() {
        let source = format!("{}1,Q1,A,B,C,D,E\n", HEADER);
        let report = Loader::default().load_bytes(source.as_bytes());
        let fields = ResponseFields {
            correct_answer_debug: false,
            question_id: false,
        };
        let state = web::Data::new(QuizState::new(report, SelectorConfig::default(), fields));
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get().uri("/questions/unit/1").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(body.get("correct_answer_debug").is_none());
        assert!(body.get("question_id").is_none());
        assert_eq!(body["options"].as_array().map(Vec::len), Some(4));
    }
}
