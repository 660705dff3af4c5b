use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::answers::SurveyInput;
use super::repository::{SessionId, SubmissionSink, SurveySessionRepository};
use super::service::{SurveyServiceError, SurveySessionService};

/// Router exposing survey sessions over HTTP.
pub fn survey_router<R, S>(service: Arc<SurveySessionService<R, S>>) -> Router
where
    R: SurveySessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    Router::new()
        .route("/api/v1/surveys", post(start_handler::<R, S>))
        .route(
            "/api/v1/surveys/:session_id",
            get(session_handler::<R, S>),
        )
        .route(
            "/api/v1/surveys/:session_id/answers",
            post(answer_handler::<R, S>),
        )
        .route(
            "/api/v1/surveys/:session_id/back",
            post(back_handler::<R, S>),
        )
        .route(
            "/api/v1/surveys/:session_id/next",
            post(next_handler::<R, S>),
        )
        .with_state(service)
}

pub(crate) async fn start_handler<R, S>(
    State(service): State<Arc<SurveySessionService<R, S>>>,
) -> Response
where
    R: SurveySessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    match service.start() {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.session_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn session_handler<R, S>(
    State(service): State<Arc<SurveySessionService<R, S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SurveySessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    match service.view(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn answer_handler<R, S>(
    State(service): State<Arc<SurveySessionService<R, S>>>,
    Path(session_id): Path<String>,
    payload: Result<axum::Json<SurveyInput>, JsonRejection>,
) -> Response
where
    R: SurveySessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    let axum::Json(input) = match payload {
        Ok(input) => input,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.answer(&SessionId(session_id), input) {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn back_handler<R, S>(
    State(service): State<Arc<SurveySessionService<R, S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SurveySessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    match service.back(&SessionId(session_id)) {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn next_handler<R, S>(
    State(service): State<Arc<SurveySessionService<R, S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SurveySessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    match service.next(&SessionId(session_id)) {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({
        "error": rejection.body_text(),
    });
    (rejection.status(), axum::Json(payload)).into_response()
}

fn error_response(error: SurveyServiceError) -> Response {
    let status = match &error {
        SurveyServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        SurveyServiceError::SessionClosed(_) => StatusCode::CONFLICT,
        SurveyServiceError::Repository(_) | SurveyServiceError::Submission(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
