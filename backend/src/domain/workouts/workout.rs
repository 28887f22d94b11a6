//! Workout aggregate root.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{WorkoutEntry, WorkoutEntryDraft, WorkoutValidationError};

/// Database-assigned workout identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkoutId(i64);

impl WorkoutId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unvalidated workout with nested entry drafts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkoutDraft {
    pub title: String,
    pub description: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    pub entries: Vec<WorkoutEntryDraft>,
}

/// A workout that passed validation and may be handed to storage.
///
/// Construct with [`NewWorkout::try_from`] on a [`WorkoutDraft`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub(super) title: String,
    pub(super) description: String,
    pub(super) duration_minutes: i32,
    pub(super) calories_burned: i32,
    pub(super) entries: Vec<WorkoutEntry>,
}

impl NewWorkout {
    pub fn new(draft: WorkoutDraft) -> Result<Self, WorkoutValidationError> {
        Self::try_from(draft)
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn duration_minutes(&self) -> i32 {
        self.duration_minutes
    }

    pub fn calories_burned(&self) -> i32 {
        self.calories_burned
    }

    /// Entries in submission order.
    pub fn entries(&self) -> &[WorkoutEntry] {
        self.entries.as_slice()
    }
}

/// Persisted workout row without its entries.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutHeader {
    pub id: WorkoutId,
    pub title: String,
    pub description: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored workout together with its ordered entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    header: WorkoutHeader,
    entries: Vec<WorkoutEntry>,
}

impl Workout {
    /// Combine a stored header with entries already in display order.
    pub fn assemble(header: WorkoutHeader, entries: Vec<WorkoutEntry>) -> Self {
        Self { header, entries }
    }

    pub fn id(&self) -> WorkoutId {
        self.header.id
    }

    pub fn title(&self) -> &str {
        self.header.title.as_str()
    }

    pub fn description(&self) -> &str {
        self.header.description.as_str()
    }

    pub fn duration_minutes(&self) -> i32 {
        self.header.duration_minutes
    }

    pub fn calories_burned(&self) -> i32 {
        self.header.calories_burned
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.header.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.header.updated_at
    }

    pub fn entries(&self) -> &[WorkoutEntry] {
        self.entries.as_slice()
    }
}
