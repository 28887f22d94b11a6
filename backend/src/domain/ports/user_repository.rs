//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Deadline, NewUser, User, UserUpdate, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}"; transient,
        /// The operation's deadline elapsed.
        Timeout { operation: String } =>
            "user repository timed out during {operation}"; transient,
        /// Username or email already taken, or another constraint failed.
        Conflict { message: String } => "user repository constraint violated: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// An update matched no row.
        NoRowsAffected { user_id: i64 } => "no user with id {user_id}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user whose password is already hashed.
    async fn create(&self, user: &NewUser, deadline: Deadline)
    -> Result<User, UserPersistenceError>;

    /// Fetch a user by username.
    async fn find_by_username(
        &self,
        username: &Username,
        deadline: Deadline,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Replace username, email and bio of the row selected by `update.id`.
    async fn update(
        &self,
        update: &UserUpdate,
        deadline: Deadline,
    ) -> Result<User, UserPersistenceError>;
}
