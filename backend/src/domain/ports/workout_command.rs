//! Driving port for workout mutations.

use async_trait::async_trait;

use crate::domain::{Deadline, Error, Workout, WorkoutDraft};

/// Driving port for creating workouts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkoutCommand: Send + Sync {
    /// Validate the draft and persist it with its entries.
    ///
    /// Validation failures surface as [`crate::domain::ErrorCode::InvalidRequest`]
    /// before any write is attempted.
    async fn create_workout(&self, draft: WorkoutDraft, deadline: Deadline)
    -> Result<Workout, Error>;
}
