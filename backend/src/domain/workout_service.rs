//! Workout aggregate service.
//!
//! Implements the workout driving ports: validates drafts before any storage
//! work and classifies repository failures into domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    WorkoutCommand, WorkoutQuery, WorkoutRepository, WorkoutRepositoryError,
};
use crate::domain::{
    Deadline, Error, NewWorkout, Workout, WorkoutDraft, WorkoutId, WorkoutValidationError,
};

fn map_validation_error(error: WorkoutValidationError) -> Error {
    let message = format!("invalid workout: {error}");
    match error {
        WorkoutValidationError::InvalidEntry { index, .. } => {
            Error::invalid_request(message).with_details(json!({ "entryIndex": index }))
        }
        WorkoutValidationError::DuplicateOrderIndex {
            order_index,
            first,
            second,
        } => Error::invalid_request(message).with_details(json!({
            "orderIndex": order_index,
            "entryIndices": [first, second],
        })),
        _ => Error::invalid_request(message),
    }
}

fn map_repository_error(error: WorkoutRepositoryError) -> Error {
    if error.is_transient() {
        warn!(%error, "workout repository unavailable");
        return Error::service_unavailable(format!("workout storage unavailable: {error}"));
    }
    match error {
        WorkoutRepositoryError::Conflict { message } => {
            Error::conflict(format!("workout rejected by storage: {message}"))
        }
        other => Error::internal(format!("workout repository error: {other}")),
    }
}

/// Service backing both workout driving ports.
#[derive(Clone)]
pub struct WorkoutService<R> {
    workout_repo: Arc<R>,
}

impl<R> WorkoutService<R> {
    pub fn new(workout_repo: Arc<R>) -> Self {
        Self { workout_repo }
    }
}

#[async_trait]
impl<R> WorkoutCommand for WorkoutService<R>
where
    R: WorkoutRepository,
{
    async fn create_workout(
        &self,
        draft: WorkoutDraft,
        deadline: Deadline,
    ) -> Result<Workout, Error> {
        let workout = NewWorkout::try_from(draft).map_err(map_validation_error)?;

        let created = self
            .workout_repo
            .create(&workout, deadline)
            .await
            .map_err(map_repository_error)?;

        info!(
            workout_id = %created.id(),
            entries = created.entries().len(),
            "workout created"
        );
        Ok(created)
    }
}

#[async_trait]
impl<R> WorkoutQuery for WorkoutService<R>
where
    R: WorkoutRepository,
{
    async fn get_workout(
        &self,
        id: WorkoutId,
        deadline: Deadline,
    ) -> Result<Option<Workout>, Error> {
        self.workout_repo
            .find_by_id(id, deadline)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "workout_service_tests.rs"]
mod tests;
