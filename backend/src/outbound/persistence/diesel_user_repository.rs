//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    Deadline, Email, NewUser, PasswordHash, User, UserId, UserRecord, UserUpdate,
    UserValidationError, Username,
};

use super::diesel_error_mapping::{DbFailure, StepError, set_statement_timeout, within_deadline};
use super::models::{NewUserRow, UserProfileChangeset, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<DbFailure> for UserPersistenceError {
    fn from(value: DbFailure) -> Self {
        match value {
            DbFailure::Connection { message } => Self::connection(message),
            DbFailure::Timeout { operation } => Self::timeout(operation),
            DbFailure::Conflict { message } => Self::conflict(message),
            DbFailure::Query { message } => Self::query(message),
        }
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let user_id = row.id;
    let invalid = |err: UserValidationError| {
        UserPersistenceError::query(format!("stored user {user_id} is invalid: {err}"))
    };
    let username = Username::new(&row.username).map_err(invalid)?;
    let email = Email::new(&row.email).map_err(invalid)?;
    Ok(User::from(UserRecord {
        id: UserId::new(row.id),
        username,
        email,
        password_hash: PasswordHash::from_bytes(row.password_hash),
        bio: row.bio,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(
        &self,
        user: &NewUser,
        deadline: Deadline,
    ) -> Result<User, UserPersistenceError> {
        let row = within_deadline(deadline, "create user", async {
            let mut conn = self.pool.get().await?;
            let row = conn
                .transaction(|conn| {
                    async move {
                        set_statement_timeout(conn, deadline).await?;
                        let row: UserRow = diesel::insert_into(users::table)
                            .values(NewUserRow {
                                username: user.username.as_ref(),
                                email: user.email.as_ref(),
                                password_hash: user.password_hash.as_bytes(),
                                bio: user.bio.as_str(),
                            })
                            .returning(UserRow::as_returning())
                            .get_result(conn)
                            .await
                            .map_err(StepError::at("insert user"))?;
                        Ok::<_, StepError>(row)
                    }
                    .scope_boxed()
                })
                .await?;
            Ok::<_, DbFailure>(row)
        })
        .await?;

        row_to_user(row)
    }

    async fn find_by_username(
        &self,
        username: &Username,
        deadline: Deadline,
    ) -> Result<Option<User>, UserPersistenceError> {
        let row = within_deadline(deadline, "fetch user", async {
            let mut conn = self.pool.get().await?;
            let row = conn
                .build_transaction()
                .read_only()
                .run(|conn| {
                    async move {
                        set_statement_timeout(conn, deadline).await?;
                        let row = users::table
                            .filter(users::username.eq(username.as_ref()))
                            .select(UserRow::as_select())
                            .first::<UserRow>(conn)
                            .await
                            .optional()
                            .map_err(StepError::at("fetch user"))?;
                        Ok::<_, StepError>(row)
                    }
                    .scope_boxed()
                })
                .await?;
            Ok::<_, DbFailure>(row)
        })
        .await?;

        row.map(row_to_user).transpose()
    }

    async fn update(
        &self,
        update: &UserUpdate,
        deadline: Deadline,
    ) -> Result<User, UserPersistenceError> {
        let user_id = update.id.get();
        let row = within_deadline(deadline, "update user", async {
            let mut conn = self.pool.get().await?;
            let row = conn
                .transaction(|conn| {
                    async move {
                        set_statement_timeout(conn, deadline).await?;
                        let changes = UserProfileChangeset {
                            username: update.username.as_ref(),
                            email: update.email.as_ref(),
                            bio: update.bio.as_str(),
                        };
                        let row = diesel::update(users::table.find(user_id))
                            .set((&changes, users::updated_at.eq(diesel::dsl::now)))
                            .returning(UserRow::as_returning())
                            .get_result::<UserRow>(conn)
                            .await
                            .optional()
                            .map_err(StepError::at("update user"))?;
                        Ok::<_, StepError>(row)
                    }
                    .scope_boxed()
                })
                .await?;
            Ok::<_, DbFailure>(row)
        })
        .await?;

        let row = row.ok_or_else(|| UserPersistenceError::no_rows_affected(user_id))?;
        row_to_user(row)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    fn row(username: &str) -> UserRow {
        let now = Utc::now();
        UserRow {
            id: 4,
            username: username.to_owned(),
            email: "ada@example.com".to_owned(),
            password_hash: b"$argon2id$stub".to_vec(),
            bio: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn stored_row_converts() {
        let user = row_to_user(row("ada")).expect("valid row");
        assert_eq!(user.id(), UserId::new(4));
        assert_eq!(user.password_hash().as_bytes(), b"$argon2id$stub");
    }

    #[rstest]
    fn blank_stored_username_is_a_query_error() {
        let error = row_to_user(row("  ")).expect_err("invalid row");
        assert!(matches!(error, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn conflicts_stay_conflicts() {
        let error = UserPersistenceError::from(DbFailure::Conflict {
            message: "insert user: users_username_key".to_owned(),
        });
        assert!(!error.is_transient());
        assert!(error.to_string().contains("users_username_key"));
    }
}
