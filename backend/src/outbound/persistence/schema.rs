//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the embedded migrations under
//! `backend/migrations` exactly.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        id -> Int8,
        #[max_length = 50]
        username -> Varchar,
        #[max_length = 255]
        email -> Varchar,
        /// Argon2id PHC string; never plaintext.
        password_hash -> Bytea,
        bio -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Workout headers. Entries live in `workout_entries`.
    workouts (id) {
        id -> Int8,
        #[max_length = 255]
        title -> Varchar,
        description -> Text,
        duration_minutes -> Int4,
        calories_burned -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered exercise entries, deleted with their workout.
    ///
    /// A check constraint admits exactly one measurement family: `reps` and/or
    /// `weight`, or `duration_seconds`.
    workout_entries (id) {
        id -> Int8,
        workout_id -> Int8,
        #[max_length = 255]
        exercise_name -> Varchar,
        sets -> Int4,
        reps -> Nullable<Int4>,
        weight -> Nullable<Float8>,
        duration_seconds -> Nullable<Int4>,
        notes -> Nullable<Text>,
        /// Caller-assigned position, unique per workout.
        order_index -> Int4,
    }
}

diesel::joinable!(workout_entries -> workouts (workout_id));

diesel::allow_tables_to_appear_in_same_query!(users, workouts, workout_entries);
