//! Driving port for user lookups.

use async_trait::async_trait;

use crate::domain::{Deadline, Error, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// Look up a user by username; `None` when no such user exists.
    async fn get_user_by_username(
        &self,
        username: &str,
        deadline: Deadline,
    ) -> Result<Option<User>, Error>;
}
