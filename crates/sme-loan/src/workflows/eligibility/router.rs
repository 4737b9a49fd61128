use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde_json::{json, Value};
use tracing::{error, warn};

use super::domain::{ReportId, SubmissionId};
use super::repository::EligibilityRepository;
use super::service::{EligibilityService, EligibilityServiceError};

const INTERNAL_ERROR_MESSAGE: &str = "internal server error, please retry later";

/// Router builder exposing the assessment, lifecycle, and admin endpoints.
pub fn eligibility_router<R>(service: Arc<EligibilityService<R>>) -> Router
where
    R: EligibilityRepository + 'static,
{
    Router::new()
        .route("/api/report/preview", post(preview_handler::<R>))
        .route("/api/submissions", post(create_submission_handler::<R>))
        .route("/api/reports/generate", post(generate_report_handler::<R>))
        .route("/api/reports/:report_id", get(report_handler::<R>))
        .route("/api/admin/submissions", get(list_submissions_handler::<R>))
        .route("/api/admin/reports", get(list_reports_handler::<R>))
        .route(
            "/api/admin/submissions/:submission_id",
            delete(delete_submission_handler::<R>),
        )
        .route(
            "/api/admin/reports/:report_id",
            delete(delete_report_handler::<R>),
        )
        .with_state(service)
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "error": message.into() });
    (status, axum::Json(payload)).into_response()
}

/// Validation is 400 and unknown ids are 404. Anything else is logged and
/// returned without detail.
fn error_response(err: EligibilityServiceError) -> Response {
    match err {
        EligibilityServiceError::Validation(_) => {
            warn!(error = %err, "request rejected");
            error_body(StatusCode::BAD_REQUEST, err.to_string())
        }
        EligibilityServiceError::SubmissionNotFound(_)
        | EligibilityServiceError::ReportNotFound(_) => {
            error_body(StatusCode::NOT_FOUND, err.to_string())
        }
        EligibilityServiceError::Repository(_) => {
            error!(error = %err, "eligibility request failed");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
        }
    }
}

fn parse_json(body: &Bytes) -> Result<Value, Response> {
    serde_json::from_slice(body)
        .map_err(|_| error_body(StatusCode::BAD_REQUEST, "request body must be JSON"))
}

/// Ids that are not integers, or not even valid UTF-8, cannot name a record.
fn parse_path_id(raw: &Result<Path<String>, PathRejection>) -> Option<i64> {
    match raw {
        Ok(Path(value)) => value.trim().parse().ok(),
        Err(_) => None,
    }
}

pub(crate) async fn preview_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    body: Bytes,
) -> Response
where
    R: EligibilityRepository + 'static,
{
    let payload = match parse_json(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    match service.preview(&payload) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_submission_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    body: Bytes,
) -> Response
where
    R: EligibilityRepository + 'static,
{
    let payload = match parse_json(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    match service.create_submission(&payload) {
        Ok(record) => {
            let payload = json!({
                "submission_id": record.id,
                "message": "submission saved",
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn generate_report_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response
where
    R: EligibilityRepository + 'static,
{
    let raw = match params
        .get("submission_id")
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
    {
        Some(raw) => raw,
        None => return error_body(StatusCode::BAD_REQUEST, "missing submission_id parameter"),
    };
    let submission_id = match raw.parse::<i64>() {
        Ok(id) => SubmissionId(id),
        Err(_) => {
            return error_body(StatusCode::BAD_REQUEST, "submission_id must be an integer");
        }
    };

    match service.generate_report(submission_id) {
        Ok(record) => {
            let payload = json!({
                "report_id": record.id,
                "message": "report generated",
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        // Generation treats an unknown submission as a bad request, not a 404.
        Err(err @ EligibilityServiceError::SubmissionNotFound(_)) => {
            error_body(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn report_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    report_id: Result<Path<String>, PathRejection>,
) -> Response
where
    R: EligibilityRepository + 'static,
{
    let Some(id) = parse_path_id(&report_id) else {
        return error_body(StatusCode::NOT_FOUND, "report not found");
    };

    match service.get_report(ReportId(id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_submissions_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
) -> Response
where
    R: EligibilityRepository + 'static,
{
    match service.list_submissions() {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_reports_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
) -> Response
where
    R: EligibilityRepository + 'static,
{
    match service.list_reports() {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_submission_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    submission_id: Result<Path<String>, PathRejection>,
) -> Response
where
    R: EligibilityRepository + 'static,
{
    let Some(id) = parse_path_id(&submission_id) else {
        return error_body(StatusCode::NOT_FOUND, "submission not found");
    };

    match service.delete_submission(SubmissionId(id)) {
        Ok(_) => {
            let payload = json!({ "message": "submission deleted" });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_report_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    report_id: Result<Path<String>, PathRejection>,
) -> Response
where
    R: EligibilityRepository + 'static,
{
    let Some(id) = parse_path_id(&report_id) else {
        return error_body(StatusCode::NOT_FOUND, "report not found");
    };

    match service.delete_report(ReportId(id)) {
        Ok(()) => {
            let payload = json!({ "message": "report deleted" });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}
