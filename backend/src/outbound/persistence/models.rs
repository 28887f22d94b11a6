//! Internal Diesel row structs.
//!
//! These never leave the persistence module; repositories convert them into
//! validated domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{users, workout_entries, workouts};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = workouts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WorkoutRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = workouts)]
pub(crate) struct NewWorkoutRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub duration_minutes: i32,
    pub calories_burned: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = workout_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WorkoutEntryRow {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_name: String,
    pub sets: i32,
    pub reps: Option<i32>,
    pub weight: Option<f64>,
    pub duration_seconds: Option<i32>,
    pub notes: Option<String>,
    pub order_index: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = workout_entries)]
pub(crate) struct NewWorkoutEntryRow<'a> {
    pub workout_id: i64,
    pub exercise_name: &'a str,
    pub sets: i32,
    pub reps: Option<i32>,
    pub weight: Option<f64>,
    pub duration_seconds: Option<i32>,
    pub notes: Option<&'a str>,
    pub order_index: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: Vec<u8>,
    pub bio: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a [u8],
    pub bio: &'a str,
}

/// Profile columns replaced by an update. `updated_at` is set separately.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileChangeset<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub bio: &'a str,
}
