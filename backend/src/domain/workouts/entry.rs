//! Exercise entries and their measurement.

use super::{EXERCISE_NAME_MAX, EntryValidationError};

/// Unvalidated entry as supplied by a caller.
///
/// Mirrors the storage shape: any combination of the measurement fields may
/// be set. [`WorkoutEntry::try_from`] decides whether the combination is
/// legal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkoutEntryDraft {
    pub exercise_name: String,
    pub sets: i32,
    pub reps: Option<i32>,
    pub weight: Option<f64>,
    pub duration_seconds: Option<i32>,
    pub notes: Option<String>,
    pub order_index: i32,
}

/// How an entry was measured.
///
/// Repetition work and timed work are mutually exclusive, so an entry
/// carrying both cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// At least one of `reps` or `weight` is present.
    Repetitions {
        reps: Option<i32>,
        weight: Option<f64>,
    },
    Duration { seconds: i32 },
}

impl Measurement {
    /// Build a measurement from the nullable storage columns.
    pub fn from_parts(
        reps: Option<i32>,
        weight: Option<f64>,
        duration_seconds: Option<i32>,
    ) -> Result<Self, EntryValidationError> {
        let repetitions = reps.is_some() || weight.is_some();
        match (repetitions, duration_seconds) {
            (true, Some(_)) => Err(EntryValidationError::MixedMeasurement),
            (false, None) => Err(EntryValidationError::MissingMeasurement),
            (false, Some(seconds)) => {
                if seconds <= 0 {
                    return Err(EntryValidationError::NonPositiveDurationSeconds { seconds });
                }
                Ok(Self::Duration { seconds })
            }
            (true, None) => {
                if let Some(reps) = reps.filter(|reps| *reps <= 0) {
                    return Err(EntryValidationError::NonPositiveReps { reps });
                }
                if let Some(weight) = weight.filter(|weight| !weight.is_finite() || *weight < 0.0)
                {
                    return Err(EntryValidationError::InvalidWeight { weight });
                }
                Ok(Self::Repetitions { reps, weight })
            }
        }
    }

    pub fn reps(&self) -> Option<i32> {
        match self {
            Self::Repetitions { reps, .. } => *reps,
            Self::Duration { .. } => None,
        }
    }

    pub fn weight(&self) -> Option<f64> {
        match self {
            Self::Repetitions { weight, .. } => *weight,
            Self::Duration { .. } => None,
        }
    }

    pub fn duration_seconds(&self) -> Option<i32> {
        match self {
            Self::Duration { seconds } => Some(*seconds),
            Self::Repetitions { .. } => None,
        }
    }
}

/// A validated exercise entry belonging to a workout.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutEntry {
    exercise_name: String,
    sets: i32,
    measurement: Measurement,
    notes: Option<String>,
    order_index: i32,
}

impl WorkoutEntry {
    /// Validate a draft; equivalent to [`WorkoutEntry::try_from`].
    ///
    /// # Examples
    /// ```
    /// use backend::domain::workouts::{Measurement, WorkoutEntry, WorkoutEntryDraft};
    ///
    /// let entry = WorkoutEntry::new(WorkoutEntryDraft {
    ///     exercise_name: "Bench press".into(),
    ///     sets: 3,
    ///     reps: Some(10),
    ///     weight: Some(135.5),
    ///     order_index: 1,
    ///     ..WorkoutEntryDraft::default()
    /// })?;
    /// assert_eq!(
    ///     entry.measurement(),
    ///     Measurement::Repetitions { reps: Some(10), weight: Some(135.5) }
    /// );
    /// # Ok::<(), backend::domain::workouts::EntryValidationError>(())
    /// ```
    pub fn new(draft: WorkoutEntryDraft) -> Result<Self, EntryValidationError> {
        Self::try_from(draft)
    }

    pub fn exercise_name(&self) -> &str {
        self.exercise_name.as_str()
    }

    pub fn sets(&self) -> i32 {
        self.sets
    }

    pub fn measurement(&self) -> Measurement {
        self.measurement
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Caller-assigned position within the workout.
    pub fn order_index(&self) -> i32 {
        self.order_index
    }
}

impl TryFrom<WorkoutEntryDraft> for WorkoutEntry {
    type Error = EntryValidationError;

    fn try_from(value: WorkoutEntryDraft) -> Result<Self, Self::Error> {
        if value.exercise_name.trim().is_empty() {
            return Err(EntryValidationError::EmptyExerciseName);
        }
        if value.exercise_name.chars().count() > EXERCISE_NAME_MAX {
            return Err(EntryValidationError::ExerciseNameTooLong {
                max: EXERCISE_NAME_MAX,
            });
        }
        if value.sets <= 0 {
            return Err(EntryValidationError::NonPositiveSets { sets: value.sets });
        }
        let measurement =
            Measurement::from_parts(value.reps, value.weight, value.duration_seconds)?;

        Ok(Self {
            exercise_name: value.exercise_name,
            sets: value.sets,
            measurement,
            notes: value.notes,
            order_index: value.order_index,
        })
    }
}

impl From<WorkoutEntry> for WorkoutEntryDraft {
    fn from(value: WorkoutEntry) -> Self {
        Self {
            reps: value.measurement.reps(),
            weight: value.measurement.weight(),
            duration_seconds: value.measurement.duration_seconds(),
            exercise_name: value.exercise_name,
            sets: value.sets,
            notes: value.notes,
            order_index: value.order_index,
        }
    }
}
