//! Tests for workout HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    MockUserCommand, MockUserQuery, MockWorkoutCommand, MockWorkoutQuery,
};
use crate::domain::{WorkoutHeader, WorkoutId};
use crate::inbound::http::error::{json_config, path_config};
use crate::inbound::http::state::HttpStatePorts;

fn stored(draft: &WorkoutDraft, id: i64) -> Workout {
    let timestamp = Utc
        .with_ymd_and_hms(2026, 2, 1, 11, 0, 0)
        .single()
        .expect("valid timestamp");
    let entries = draft
        .entries
        .iter()
        .cloned()
        .map(|entry| WorkoutEntry::new(entry).expect("valid entry"))
        .collect();
    Workout::assemble(
        WorkoutHeader {
            id: WorkoutId::new(id),
            title: draft.title.clone(),
            description: draft.description.clone(),
            duration_minutes: draft.duration_minutes,
            calories_burned: draft.calories_burned,
            created_at: timestamp,
            updated_at: timestamp,
        },
        entries,
    )
}

#[fixture]
fn push_day_payload() -> Value {
    json!({
        "title": "push day",
        "description": "chest and triceps",
        "durationMinutes": 45,
        "caloriesBurned": 320,
        "entries": [{
            "exerciseName": "Bench press",
            "sets": 3,
            "reps": 10,
            "weight": 135.5,
            "orderIndex": 1
        }]
    })
}

async fn app_with(
    workouts: MockWorkoutCommand,
    workouts_query: MockWorkoutQuery,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    let state = HttpState::new(HttpStatePorts {
        workouts: Arc::new(workouts),
        workouts_query: Arc::new(workouts_query),
        users: Arc::new(MockUserCommand::new()),
        users_query: Arc::new(MockUserQuery::new()),
    });
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .app_data(path_config())
            .service(create_workout)
            .service(get_workout),
    )
    .await
}

#[rstest]
#[actix_web::test]
async fn create_returns_created_workout(push_day_payload: Value) {
    let mut command = MockWorkoutCommand::new();
    command
        .expect_create_workout()
        .times(1)
        .withf(|draft, _| {
            draft.title == "push day"
                && draft.entries.len() == 1
                && draft.entries[0].weight == Some(135.5)
                && draft.entries[0].duration_seconds.is_none()
        })
        .returning(|draft, _| Ok(stored(&draft, 42)));
    let app = app_with(command, MockWorkoutQuery::new()).await;

    let req = actix_test::TestRequest::post()
        .uri("/workouts")
        .set_json(&push_day_payload)
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(
        res.headers()
            .get(actix_web::http::header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/workouts/42")
    );
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["id"], 42);
    assert_eq!(body["title"], "push day");
    assert_eq!(body["entries"][0]["exerciseName"], "Bench press");
    assert_eq!(body["entries"][0]["weight"], 135.5);
    assert_eq!(body["entries"][0]["orderIndex"], 1);
    assert!(body["entries"][0].get("durationSeconds").is_none());
}

#[rstest]
#[actix_web::test]
async fn create_maps_validation_failure_to_bad_request(push_day_payload: Value) {
    let mut command = MockWorkoutCommand::new();
    command.expect_create_workout().times(1).returning(|_, _| {
        Err(Error::invalid_request(
            "entry 0 is invalid: an entry cannot mix repetitions or weight with a duration",
        )
        .with_details(json!({"entryIndex": 0})))
    });
    let app = app_with(command, MockWorkoutQuery::new()).await;

    let req = actix_test::TestRequest::post()
        .uri("/workouts")
        .set_json(&push_day_payload)
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["entryIndex"], 0);
}

#[actix_web::test]
async fn create_rejects_malformed_body_without_calling_service() {
    let mut command = MockWorkoutCommand::new();
    command.expect_create_workout().times(0);
    let app = app_with(command, MockWorkoutQuery::new()).await;

    let req = actix_test::TestRequest::post()
        .uri("/workouts")
        .set_json(json!({"title": "push day", "durationMinutes": "long"}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn get_returns_stored_workout(push_day_payload: Value) {
    let body: CreateWorkoutRequestBody =
        serde_json::from_value(push_day_payload).expect("payload decodes");
    let draft = WorkoutDraft::from(body);
    let mut query = MockWorkoutQuery::new();
    query
        .expect_get_workout()
        .times(1)
        .withf(|id, _| *id == WorkoutId::new(42))
        .returning(move |_, _| Ok(Some(stored(&draft, 42))));
    let app = app_with(MockWorkoutCommand::new(), query).await;

    let req = actix_test::TestRequest::get().uri("/workouts/42").to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: WorkoutResponseBody = actix_test::read_body_json(res).await;
    assert_eq!(body.id, 42);
    assert_eq!(body.duration_minutes, 45);
    assert_eq!(body.created_at, "2026-02-01T11:00:00+00:00");
    assert_eq!(body.entries.len(), 1);
    assert_eq!(body.entries[0].reps, Some(10));
}

#[actix_web::test]
async fn get_missing_workout_is_not_found() {
    let mut query = MockWorkoutQuery::new();
    query.expect_get_workout().returning(|_, _| Ok(None));
    let app = app_with(MockWorkoutCommand::new(), query).await;

    let req = actix_test::TestRequest::get().uri("/workouts/999").to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[case::unavailable(Error::service_unavailable("database unavailable"), StatusCode::SERVICE_UNAVAILABLE)]
#[case::internal(Error::internal("relation missing"), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn get_maps_service_errors(#[case] error: Error, #[case] expected: StatusCode) {
    let mut query = MockWorkoutQuery::new();
    query
        .expect_get_workout()
        .returning(move |_, _| Err(error.clone()));
    let app = app_with(MockWorkoutCommand::new(), query).await;

    let req = actix_test::TestRequest::get().uri("/workouts/1").to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), expected);
}

#[actix_web::test]
async fn get_rejects_non_numeric_id() {
    let mut query = MockWorkoutQuery::new();
    query.expect_get_workout().times(0);
    let app = app_with(MockWorkoutCommand::new(), query).await;

    let req = actix_test::TestRequest::get().uri("/workouts/abc").to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
