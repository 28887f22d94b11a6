//! Shared Diesel error classification and deadline enforcement.
//!
//! Repositories funnel every pool, Diesel, and deadline failure through
//! [`DbFailure`] and then convert it into their own port error.

use std::future::Future;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::Deadline;

use super::pool::PoolError;

/// Message PostgreSQL attaches to queries cancelled by `statement_timeout`.
const STATEMENT_TIMEOUT_MESSAGE: &str = "canceling statement due to statement timeout";

/// Storage failure classified by retry and conflict semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DbFailure {
    Connection { message: String },
    Timeout { operation: String },
    Conflict { message: String },
    Query { message: String },
}

/// Diesel error tagged with the step that produced it.
///
/// Used as the error type of transaction closures so the rollback reason
/// keeps its context.
#[derive(Debug)]
pub(crate) struct StepError {
    step: &'static str,
    source: DieselError,
}

impl StepError {
    pub(crate) fn at(step: &'static str) -> impl FnOnce(DieselError) -> Self {
        move |source| Self { step, source }
    }
}

impl From<DieselError> for StepError {
    fn from(source: DieselError) -> Self {
        Self {
            step: "transaction",
            source,
        }
    }
}

impl From<StepError> for DbFailure {
    fn from(value: StepError) -> Self {
        classify_diesel_error(value.source, value.step)
    }
}

impl From<PoolError> for DbFailure {
    fn from(error: PoolError) -> Self {
        let message = match error {
            PoolError::Checkout { message } | PoolError::Build { message } => message,
        };
        Self::Connection { message }
    }
}

/// Classify a Diesel error raised while performing `operation`.
pub(crate) fn classify_diesel_error(error: DieselError, operation: &str) -> DbFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(operation, ?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            operation,
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::CheckViolation
            | DatabaseErrorKind::NotNullViolation,
            info,
        ) => DbFailure::Conflict {
            message: format!(
                "{operation}: {}",
                info.constraint_name().unwrap_or(info.message())
            ),
        },
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DbFailure::Connection {
                message: format!("{operation}: database connection closed"),
            }
        }
        DieselError::DatabaseError(_, info) if info.message() == STATEMENT_TIMEOUT_MESSAGE => {
            DbFailure::Timeout {
                operation: operation.to_owned(),
            }
        }
        DieselError::NotFound => DbFailure::Query {
            message: format!("{operation}: record not found"),
        },
        _ => DbFailure::Query {
            message: format!("{operation}: database error"),
        },
    }
}

/// Run `work` bounded by `deadline`.
///
/// An already expired deadline fails without polling `work`, so no
/// connection is checked out. Dropping `work` mid-transaction drops the
/// pooled connection, which the pool discards instead of reusing.
pub(crate) async fn within_deadline<T, F>(
    deadline: Deadline,
    operation: &'static str,
    work: F,
) -> Result<T, DbFailure>
where
    F: Future<Output = Result<T, DbFailure>>,
{
    if deadline.is_expired() {
        return Err(DbFailure::Timeout {
            operation: operation.to_owned(),
        });
    }
    match tokio::time::timeout_at(deadline.instant(), work).await {
        Ok(result) => result,
        Err(_) => {
            debug!(operation, "deadline elapsed");
            Err(DbFailure::Timeout {
                operation: operation.to_owned(),
            })
        }
    }
}

/// Cap every statement in the current transaction at the remaining budget.
pub(crate) async fn set_statement_timeout(
    conn: &mut AsyncPgConnection,
    deadline: Deadline,
) -> Result<(), StepError> {
    // Zero disables the timeout in PostgreSQL, so clamp to one millisecond.
    let millis = deadline.remaining().as_millis().clamp(1, i32::MAX as u128);
    diesel::sql_query(format!("SET LOCAL statement_timeout = {millis}"))
        .execute(conn)
        .await
        .map(|_| ())
        .map_err(StepError::at("set statement timeout"))
}
