//! Driving port for workout reads.

use async_trait::async_trait;

use crate::domain::{Deadline, Error, Workout, WorkoutId};

/// Driving port for loading workouts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkoutQuery: Send + Sync {
    /// Fetch a workout with its ordered entries, or `None` when absent.
    async fn get_workout(&self, id: WorkoutId, deadline: Deadline)
    -> Result<Option<Workout>, Error>;
}
