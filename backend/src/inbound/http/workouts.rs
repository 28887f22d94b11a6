//! Workout HTTP handlers.
//!
//! ```text
//! POST /workouts
//! GET  /workouts/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Workout, WorkoutDraft, WorkoutEntry, WorkoutEntryDraft, WorkoutId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// One exercise in a workout, as submitted by the client.
///
/// Set `reps` and/or `weight` for repetition work, or `durationSeconds` for
/// timed work; never both.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEntryRequestBody {
    #[schema(example = "Bench press")]
    pub exercise_name: String,
    #[schema(example = 3)]
    pub sets: i32,
    #[serde(default)]
    #[schema(example = 10)]
    pub reps: Option<i32>,
    #[serde(default)]
    #[schema(example = 135.5)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub duration_seconds: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[schema(example = 1)]
    pub order_index: i32,
}

/// Request payload for creating a workout with its entries.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutRequestBody {
    #[schema(example = "push day")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[schema(example = 45)]
    pub duration_minutes: i32,
    #[serde(default)]
    #[schema(example = 320)]
    pub calories_burned: i32,
    #[serde(default)]
    pub entries: Vec<WorkoutEntryRequestBody>,
}

/// A persisted workout entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEntryResponseBody {
    pub exercise_name: String,
    pub sets: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub order_index: i32,
}

/// A persisted workout with its entries in `orderIndex` order.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutResponseBody {
    #[schema(example = 42)]
    pub id: i64,
    pub title: String,
    pub description: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
    pub entries: Vec<WorkoutEntryResponseBody>,
}

impl From<WorkoutEntryRequestBody> for WorkoutEntryDraft {
    fn from(value: WorkoutEntryRequestBody) -> Self {
        Self {
            exercise_name: value.exercise_name,
            sets: value.sets,
            reps: value.reps,
            weight: value.weight,
            duration_seconds: value.duration_seconds,
            notes: value.notes,
            order_index: value.order_index,
        }
    }
}

impl From<CreateWorkoutRequestBody> for WorkoutDraft {
    fn from(value: CreateWorkoutRequestBody) -> Self {
        Self {
            title: value.title,
            description: value.description,
            duration_minutes: value.duration_minutes,
            calories_burned: value.calories_burned,
            entries: value.entries.into_iter().map(WorkoutEntryDraft::from).collect(),
        }
    }
}

impl From<&WorkoutEntry> for WorkoutEntryResponseBody {
    fn from(entry: &WorkoutEntry) -> Self {
        let measurement = entry.measurement();
        Self {
            exercise_name: entry.exercise_name().to_owned(),
            sets: entry.sets(),
            reps: measurement.reps(),
            weight: measurement.weight(),
            duration_seconds: measurement.duration_seconds(),
            notes: entry.notes().map(str::to_owned),
            order_index: entry.order_index(),
        }
    }
}

impl From<&Workout> for WorkoutResponseBody {
    fn from(workout: &Workout) -> Self {
        Self {
            id: workout.id().get(),
            title: workout.title().to_owned(),
            description: workout.description().to_owned(),
            duration_minutes: workout.duration_minutes(),
            calories_burned: workout.calories_burned(),
            created_at: workout.created_at().to_rfc3339(),
            updated_at: workout.updated_at().to_rfc3339(),
            entries: workout
                .entries()
                .iter()
                .map(WorkoutEntryResponseBody::from)
                .collect(),
        }
    }
}

/// Create a workout and all of its entries in one transaction.
///
/// Validation failures are reported before anything is written; the
/// `details` object carries the offending `entryIndex`.
#[utoipa::path(
    post,
    path = "/workouts",
    request_body = CreateWorkoutRequestBody,
    responses(
        (status = 201, description = "Workout created", body = WorkoutResponseBody),
        (status = 400, description = "Invalid workout or entry", body = ErrorSchema),
        (status = 409, description = "Rejected by a database constraint", body = ErrorSchema),
        (status = 503, description = "Database unavailable or deadline elapsed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["workouts"],
    operation_id = "createWorkout"
)]
#[post("/workouts")]
pub async fn create_workout(
    state: web::Data<HttpState>,
    payload: web::Json<CreateWorkoutRequestBody>,
) -> ApiResult<HttpResponse> {
    let deadline = state.deadline();
    let workout = state
        .workouts
        .create_workout(WorkoutDraft::from(payload.into_inner()), deadline)
        .await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/workouts/{}", workout.id())))
        .json(WorkoutResponseBody::from(&workout)))
}

/// Fetch a workout with its entries.
#[utoipa::path(
    get,
    path = "/workouts/{id}",
    params(("id" = i64, Path, description = "Workout identifier")),
    responses(
        (status = 200, description = "Workout found", body = WorkoutResponseBody),
        (status = 400, description = "Identifier is not an integer", body = ErrorSchema),
        (status = 404, description = "No such workout", body = ErrorSchema),
        (status = 503, description = "Database unavailable or deadline elapsed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["workouts"],
    operation_id = "getWorkout"
)]
#[get("/workouts/{id}")]
pub async fn get_workout(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<WorkoutResponseBody>> {
    let id = WorkoutId::new(path.into_inner());
    let deadline = state.deadline();
    let workout = state
        .workouts_query
        .get_workout(id, deadline)
        .await?
        .ok_or_else(|| Error::not_found(format!("workout {id} not found")))?;

    Ok(web::Json(WorkoutResponseBody::from(&workout)))
}

#[cfg(test)]
#[path = "workouts_tests.rs"]
mod tests;
