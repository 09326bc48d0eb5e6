//! Route table tests against fixture and mocked ports.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{FixtureMarksQuery, MockMarksQuery, MockStudentDirectory};
use crate::domain::{LookupError, Student};
use crate::inbound::http::health::HealthState;
use crate::inbound::http::lookup::LookupSettings;

async fn get_json(state: HttpState, uri: &str) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(HealthState::new()))
            .configure(|cfg| configure(cfg, &state)),
    )
    .await;
    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    let status = res.status();
    let body: Value = test::read_body_json(res).await;
    (status, body)
}

#[fixture]
fn fixtures() -> HttpState {
    HttpState::fixtures(LookupSettings::default())
}

#[rstest]
#[actix_web::test]
async fn student_route_returns_fixture(fixtures: HttpState) {
    let (status, body) = get_json(fixtures, "/api/v1/students/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 2, "displayName": "Alan Turing"}));
}

#[rstest]
#[actix_web::test]
async fn marks_route_returns_list(fixtures: HttpState) {
    let (status, body) = get_json(fixtures, "/api/v1/students/1/marks").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"studentId": 1, "course": "Mathematics", "score": 92},
            {"studentId": 1, "course": "Physics", "score": 85},
        ])
    );
}

#[rstest]
#[actix_web::test]
async fn student_without_marks_gets_empty_array(fixtures: HttpState) {
    let (status, body) = get_json(fixtures, "/api/v1/students/3/marks").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[rstest]
#[actix_web::test]
async fn unknown_student_is_a_generic_lookup_failure(fixtures: HttpState) {
    let (status, body) = get_json(fixtures, "/api/v1/students/404").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "failed to get all entities"}));
}

#[rstest]
#[actix_web::test]
async fn unmatched_path_is_json_not_found(fixtures: HttpState) {
    let (status, body) = get_json(fixtures, "/api/v1/courses").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "resource not found"}));
}

#[rstest]
#[actix_web::test]
async fn student_route_calls_port_once_with_parsed_id() {
    let mut students = MockStudentDirectory::new();
    students
        .expect_student_by_id()
        .withf(|ctx, id| *id == 42 && ctx.raw_id() == "42")
        .times(1)
        .returning(|_, id| Ok(Student::new(id, "Mocked")));
    let state = HttpState::new(
        Arc::new(students),
        Arc::new(FixtureMarksQuery),
        LookupSettings::default(),
    );

    let (status, body) = get_json(state, "/api/v1/students/42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 42, "displayName": "Mocked"}));
}

#[rstest]
#[actix_web::test]
async fn malformed_id_never_reaches_port() {
    let mut marks = MockMarksQuery::new();
    marks.expect_marks_for_student().never();
    let state = HttpState::new(
        Arc::new(MockStudentDirectory::new()),
        Arc::new(marks),
        LookupSettings::default(),
    );

    let (status, body) = get_json(state, "/api/v1/students/abc/marks").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "id should be an integer"}));
}

#[rstest]
#[actix_web::test]
async fn configured_failure_status_applies_to_every_route() {
    let mut marks = MockMarksQuery::new();
    marks
        .expect_marks_for_student()
        .times(1)
        .returning(|_, _| Err(LookupError::unavailable("primary down")));
    let settings = LookupSettings::default().with_failure_status(StatusCode::SERVICE_UNAVAILABLE);
    let state = HttpState::new(
        Arc::new(MockStudentDirectory::new()),
        Arc::new(marks),
        settings,
    );

    let (status, body) = get_json(state, "/api/v1/students/1/marks").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"error": "failed to get all entities"}));
}
