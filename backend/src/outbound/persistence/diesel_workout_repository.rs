//! PostgreSQL-backed `WorkoutRepository` implementation using Diesel ORM.
//!
//! A workout and its entries are written in one transaction and read back in
//! one repeatable-read, read-only transaction, so callers never observe a
//! workout without its entries.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{WorkoutRepository, WorkoutRepositoryError};
use crate::domain::{
    Deadline, NewWorkout, Workout, WorkoutEntry, WorkoutEntryDraft, WorkoutHeader, WorkoutId,
};

use super::diesel_error_mapping::{DbFailure, StepError, set_statement_timeout, within_deadline};
use super::models::{NewWorkoutEntryRow, NewWorkoutRow, WorkoutEntryRow, WorkoutRow};
use super::pool::DbPool;
use super::schema::{workout_entries, workouts};

/// Diesel-backed implementation of the workout repository port.
#[derive(Clone)]
pub struct DieselWorkoutRepository {
    pool: DbPool,
}

impl DieselWorkoutRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use backend::outbound::persistence::{DbPool, DieselWorkoutRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/fitness")).await?;
    /// let repository = DieselWorkoutRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<DbFailure> for WorkoutRepositoryError {
    fn from(value: DbFailure) -> Self {
        match value {
            DbFailure::Connection { message } => Self::connection(message),
            DbFailure::Timeout { operation } => Self::timeout(operation),
            DbFailure::Conflict { message } => Self::conflict(message),
            DbFailure::Query { message } => Self::query(message),
        }
    }
}

fn header_from_row(row: WorkoutRow) -> WorkoutHeader {
    WorkoutHeader {
        id: WorkoutId::new(row.id),
        title: row.title,
        description: row.description,
        duration_minutes: row.duration_minutes,
        calories_burned: row.calories_burned,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn entry_row(workout_id: i64, entry: &WorkoutEntry) -> NewWorkoutEntryRow<'_> {
    let measurement = entry.measurement();
    NewWorkoutEntryRow {
        workout_id,
        exercise_name: entry.exercise_name(),
        sets: entry.sets(),
        reps: measurement.reps(),
        weight: measurement.weight(),
        duration_seconds: measurement.duration_seconds(),
        notes: entry.notes(),
        order_index: entry.order_index(),
    }
}

/// Rebuild a domain entry, re-checking the stored measurement columns.
fn entry_from_row(row: WorkoutEntryRow) -> Result<WorkoutEntry, WorkoutRepositoryError> {
    let entry_id = row.id;
    WorkoutEntry::try_from(WorkoutEntryDraft {
        exercise_name: row.exercise_name,
        sets: row.sets,
        reps: row.reps,
        weight: row.weight,
        duration_seconds: row.duration_seconds,
        notes: row.notes,
        order_index: row.order_index,
    })
    .map_err(|err| WorkoutRepositoryError::query(format!("stored entry {entry_id} is invalid: {err}")))
}

#[async_trait]
impl WorkoutRepository for DieselWorkoutRepository {
    async fn create(
        &self,
        workout: &NewWorkout,
        deadline: Deadline,
    ) -> Result<Workout, WorkoutRepositoryError> {
        within_deadline(deadline, "create workout", async {
            let mut conn = self.pool.get().await?;

            let header = conn
                .transaction(|conn| {
                    async move {
                        set_statement_timeout(conn, deadline).await?;

                        let header: WorkoutRow = diesel::insert_into(workouts::table)
                            .values(NewWorkoutRow {
                                title: workout.title(),
                                description: workout.description(),
                                duration_minutes: workout.duration_minutes(),
                                calories_burned: workout.calories_burned(),
                            })
                            .returning(WorkoutRow::as_returning())
                            .get_result(conn)
                            .await
                            .map_err(StepError::at("insert workout"))?;

                        let rows: Vec<NewWorkoutEntryRow<'_>> = workout
                            .entries()
                            .iter()
                            .map(|entry| entry_row(header.id, entry))
                            .collect();
                        if !rows.is_empty() {
                            diesel::insert_into(workout_entries::table)
                                .values(&rows)
                                .execute(conn)
                                .await
                                .map_err(StepError::at("insert workout entries"))?;
                        }

                        Ok::<_, StepError>(header)
                    }
                    .scope_boxed()
                })
                .await?;

            Ok::<_, DbFailure>(Workout::assemble(
                header_from_row(header),
                workout.entries().to_vec(),
            ))
        })
        .await
        .map_err(WorkoutRepositoryError::from)
    }

    async fn find_by_id(
        &self,
        id: WorkoutId,
        deadline: Deadline,
    ) -> Result<Option<Workout>, WorkoutRepositoryError> {
        let rows = within_deadline(deadline, "fetch workout", async {
            let mut conn = self.pool.get().await?;

            let rows = conn
                .build_transaction()
                .read_only()
                .repeatable_read()
                .run(|conn| {
                    async move {
                        set_statement_timeout(conn, deadline).await?;

                        let Some(header) = workouts::table
                            .find(id.get())
                            .select(WorkoutRow::as_select())
                            .first::<WorkoutRow>(conn)
                            .await
                            .optional()
                            .map_err(StepError::at("fetch workout"))?
                        else {
                            return Ok(None);
                        };

                        let entries: Vec<WorkoutEntryRow> = workout_entries::table
                            .filter(workout_entries::workout_id.eq(header.id))
                            .order((
                                workout_entries::order_index.asc(),
                                workout_entries::id.asc(),
                            ))
                            .select(WorkoutEntryRow::as_select())
                            .load(conn)
                            .await
                            .map_err(StepError::at("fetch workout entries"))?;

                        Ok::<_, StepError>(Some((header, entries)))
                    }
                    .scope_boxed()
                })
                .await?;
            Ok::<_, DbFailure>(rows)
        })
        .await?;

        let Some((header, entry_rows)) = rows else {
            return Ok(None);
        };
        let entries = entry_rows
            .into_iter()
            .map(entry_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(Workout::assemble(header_from_row(header), entries)))
    }
}
