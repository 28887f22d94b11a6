//! Workout aggregate domain types.
//!
//! A workout owns an ordered list of exercise entries. Entries are validated
//! as a batch before any storage work starts so a rejected entry never leaves
//! a partially persisted workout behind.

use std::fmt;

mod entry;
mod validation;
mod workout;

pub use entry::{Measurement, WorkoutEntry, WorkoutEntryDraft};
pub use validation::validate_entries;
pub use workout::{NewWorkout, Workout, WorkoutDraft, WorkoutHeader, WorkoutId};

/// Maximum length of a workout title, in characters.
pub const TITLE_MAX: usize = 255;
/// Maximum length of an exercise name, in characters.
pub const EXERCISE_NAME_MAX: usize = 255;

/// Rule violations for a single workout entry.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValidationError {
    EmptyExerciseName,
    ExerciseNameTooLong { max: usize },
    NonPositiveSets { sets: i32 },
    /// Repetition fields and a duration were both supplied.
    MixedMeasurement,
    /// Neither repetition fields nor a duration were supplied.
    MissingMeasurement,
    NonPositiveReps { reps: i32 },
    InvalidWeight { weight: f64 },
    NonPositiveDurationSeconds { seconds: i32 },
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyExerciseName => write!(f, "exercise name must not be blank"),
            Self::ExerciseNameTooLong { max } => {
                write!(f, "exercise name must be at most {max} characters")
            }
            Self::NonPositiveSets { sets } => write!(f, "sets must be positive (got {sets})"),
            Self::MixedMeasurement => write!(
                f,
                "entry must set either reps/weight or duration_seconds, not both"
            ),
            Self::MissingMeasurement => write!(
                f,
                "entry must set reps/weight or duration_seconds"
            ),
            Self::NonPositiveReps { reps } => write!(f, "reps must be positive (got {reps})"),
            Self::InvalidWeight { weight } => {
                write!(f, "weight must be finite and non-negative (got {weight})")
            }
            Self::NonPositiveDurationSeconds { seconds } => {
                write!(f, "duration_seconds must be positive (got {seconds})")
            }
        }
    }
}

impl std::error::Error for EntryValidationError {}

/// Rule violations for a workout and its entry batch.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutValidationError {
    EmptyTitle,
    TitleTooLong { max: usize },
    NonPositiveDuration { minutes: i32 },
    NegativeCalories { calories: i32 },
    /// Entry at zero-based `index` failed its own rules.
    InvalidEntry {
        index: usize,
        reason: EntryValidationError,
    },
    /// Two entries in the batch share an `order_index`.
    DuplicateOrderIndex {
        order_index: i32,
        first: usize,
        second: usize,
    },
}

impl fmt::Display for WorkoutValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "workout title must not be blank"),
            Self::TitleTooLong { max } => {
                write!(f, "workout title must be at most {max} characters")
            }
            Self::NonPositiveDuration { minutes } => {
                write!(f, "duration_minutes must be positive (got {minutes})")
            }
            Self::NegativeCalories { calories } => {
                write!(f, "calories_burned must not be negative (got {calories})")
            }
            Self::InvalidEntry { index, reason } => {
                write!(f, "entry {index} is invalid: {reason}")
            }
            Self::DuplicateOrderIndex {
                order_index,
                first,
                second,
            } => write!(
                f,
                "entries {first} and {second} share order_index {order_index}"
            ),
        }
    }
}

impl std::error::Error for WorkoutValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidEntry { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
