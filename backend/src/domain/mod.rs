//! Domain primitives and aggregates.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! adapters, the ports between them, and the services implementing the
//! driving ports. Types are immutable once validated.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure payload.
//! - Deadline: per-operation time budget.
//! - workouts: the workout aggregate and its entry validator.
//! - User, PasswordHash: user accounts with hashed passwords.

pub mod deadline;
pub mod error;
pub mod password;
pub mod ports;
pub mod user;
pub mod user_service;
pub mod workout_service;
pub mod workouts;

pub use self::deadline::Deadline;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::password::{HashCost, PasswordHash, PasswordHashError};
pub use self::user::{
    Email, NewUser, User, UserDraft, UserId, UserRecord, UserUpdate, UserValidationError,
    Username, ValidatedUserDraft,
};
pub use self::user_service::UserService;
pub use self::workout_service::WorkoutService;
pub use self::workouts::{
    EXERCISE_NAME_MAX, EntryValidationError, Measurement, NewWorkout, TITLE_MAX, Workout,
    WorkoutDraft, WorkoutEntry, WorkoutEntryDraft, WorkoutHeader, WorkoutId,
    WorkoutValidationError, validate_entries,
};

