use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::eligibility::EligibilityService;

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(payload).expect("payload serializes"),
        ))
        .expect("request")
}

fn empty(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn preview_route_returns_report_payload() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json("/api/report/preview", &answers_json()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["scores"],
        json!({"tax": 60, "flow": 60, "mortgage": 0, "credit": 100})
    );
    assert_eq!(payload["current_loan_range"], json!({"min": 50, "max": 200}));
    assert_eq!(payload["reform_plans"][0]["plan"], json!("C"));
    assert_eq!(
        payload["recommended_products"]
            .as_array()
            .map(Vec::len),
        Some(3)
    );
}

#[tokio::test]
async fn preview_route_rejects_invalid_answers_naming_field() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let mut answers = answers_json();
    answers["annual_invoice"] = json!(-5);
    let response = router
        .oneshot(post_json("/api/report/preview", &answers))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("annual_invoice"));
}

#[tokio::test]
async fn non_json_bodies_are_bad_requests() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(
            Request::post("/api/submissions")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from("annual_invoice=300"))
                .expect("request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], json!("request body must be JSON"));
}

#[tokio::test]
async fn generate_route_validates_submission_id() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let missing = router
        .clone()
        .oneshot(empty("POST", "/api/reports/generate"))
        .await
        .expect("route executes");
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json_body(missing).await["error"],
        json!("missing submission_id parameter")
    );

    let non_integer = router
        .clone()
        .oneshot(empty("POST", "/api/reports/generate?submission_id=abc"))
        .await
        .expect("route executes");
    assert_eq!(non_integer.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json_body(non_integer).await["error"],
        json!("submission_id must be an integer")
    );

    let unknown = router
        .oneshot(empty("POST", "/api/reports/generate?submission_id=77"))
        .await
        .expect("route executes");
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    for (method, uri) in [
        ("GET", "/api/reports/9"),
        ("DELETE", "/api/admin/submissions/9"),
        ("DELETE", "/api/admin/reports/9"),
    ] {
        let response = router
            .clone()
            .oneshot(empty(method, uri))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
    }
}

#[tokio::test]
async fn malformed_path_ids_are_json_not_found() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    for (method, uri) in [
        ("GET", "/api/reports/not-a-number"),
        ("DELETE", "/api/admin/submissions/not-a-number"),
        ("DELETE", "/api/admin/reports/not-a-number"),
        ("GET", "/api/reports/%FF"),
        ("DELETE", "/api/admin/submissions/%FF"),
        ("DELETE", "/api/admin/reports/%FF"),
    ] {
        let response = router
            .clone()
            .oneshot(empty(method, uri))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
        let payload = read_json_body(response).await;
        assert!(
            payload["error"]
                .as_str()
                .is_some_and(|message| message.ends_with("not found")),
            "{method} {uri}: {payload}"
        );
    }
}

#[tokio::test]
async fn repository_failures_are_opaque_internal_errors() {
    let service = Arc::new(EligibilityService::new(
        Arc::new(UnavailableRepository),
        catalog(),
    ));

    let response = crate::workflows::eligibility::router::list_submissions_handler::<
        UnavailableRepository,
    >(State(service))
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    let message = payload["error"].as_str().unwrap_or_default();
    assert!(!message.contains("database offline"));
    assert!(message.contains("internal server error"));
}

#[tokio::test]
async fn lifecycle_round_trip_over_http() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let created = router
        .clone()
        .oneshot(post_json("/api/submissions", &envelope(answers_json())))
        .await
        .expect("route executes");
    assert_eq!(created.status(), StatusCode::OK);
    let submission_id = read_json_body(created).await["submission_id"]
        .as_i64()
        .expect("submission id");

    let generated = router
        .clone()
        .oneshot(empty(
            "POST",
            &format!("/api/reports/generate?submission_id={submission_id}"),
        ))
        .await
        .expect("route executes");
    assert_eq!(generated.status(), StatusCode::OK);
    let report_id = read_json_body(generated).await["report_id"]
        .as_i64()
        .expect("report id");

    let fetched = router
        .clone()
        .oneshot(empty("GET", &format!("/api/reports/{report_id}")))
        .await
        .expect("route executes");
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(read_json_body(fetched).await["scores"]["credit"], json!(100));

    let listed = router
        .clone()
        .oneshot(empty("GET", "/api/admin/reports"))
        .await
        .expect("route executes");
    let reports = read_json_body(listed).await;
    assert_eq!(reports[0]["submission_id"], json!(submission_id));
    assert_eq!(reports[0]["report_json"]["reform_plans"][0]["plan"], json!("C"));

    let submissions = router
        .clone()
        .oneshot(empty("GET", "/api/admin/submissions"))
        .await
        .expect("route executes");
    let submissions = read_json_body(submissions).await;
    assert_eq!(submissions[0]["answers"]["overdue_level"], json!("none"));
    assert!(submissions[0]["created_at"].is_string());

    let deleted = router
        .clone()
        .oneshot(empty("DELETE", &format!("/api/admin/submissions/{submission_id}")))
        .await
        .expect("route executes");
    assert_eq!(deleted.status(), StatusCode::OK);

    let gone = router
        .oneshot(empty("GET", &format!("/api/reports/{report_id}")))
        .await
        .expect("route executes");
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn submitted_floats_are_listed_unchanged() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let mut answers = answers_json();
    answers["annual_invoice"] = json!(9.999999999999995);
    let created = router
        .clone()
        .oneshot(post_json("/api/submissions", &envelope(answers)))
        .await
        .expect("route executes");
    assert_eq!(created.status(), StatusCode::OK);

    let listed = router
        .oneshot(empty("GET", "/api/admin/submissions"))
        .await
        .expect("route executes");
    let submissions = read_json_body(listed).await;
    assert_eq!(
        submissions[0]["answers"]["annual_invoice"].as_f64(),
        Some(9.999999999999995)
    );
}
