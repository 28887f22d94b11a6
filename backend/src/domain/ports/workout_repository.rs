//! Port for persisting and reading workout aggregates.

use async_trait::async_trait;

use crate::domain::{Deadline, NewWorkout, Workout, WorkoutId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by workout repository adapters.
    pub enum WorkoutRepositoryError {
        /// A pooled connection could not be obtained or was lost.
        Connection { message: String } =>
            "workout repository connection failed: {message}"; transient,
        /// The operation's deadline elapsed; the transaction rolled back.
        Timeout { operation: String } =>
            "workout repository timed out during {operation}"; transient,
        /// A database constraint rejected the write; nothing was committed.
        Conflict { message: String } =>
            "workout repository constraint violated: {message}",
        /// Any other database failure.
        Query { message: String } =>
            "workout repository query failed: {message}",
    }
}

/// Driven port storing a workout and its entries as one unit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Insert the workout and every entry in one transaction.
    ///
    /// Returns the aggregate with generated id and timestamps. On error no
    /// row survives.
    async fn create(
        &self,
        workout: &NewWorkout,
        deadline: Deadline,
    ) -> Result<Workout, WorkoutRepositoryError>;

    /// Load a workout with entries ordered by `order_index`.
    async fn find_by_id(
        &self,
        id: WorkoutId,
        deadline: Deadline,
    ) -> Result<Option<Workout>, WorkoutRepositoryError>;
}
