//! User account service.
//!
//! Validates registration and profile input, hashes passwords off the async
//! executor, and maps persistence failures into domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    UserCommand, UserPersistenceError, UserQuery, UserRepository, UserUpdateRequest,
};
use crate::domain::{
    Deadline, Email, Error, HashCost, NewUser, PasswordHash, User, UserDraft, UserUpdate,
    UserValidationError, Username,
};

fn map_validation_error(error: UserValidationError) -> Error {
    Error::invalid_request(format!("invalid user: {error}"))
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    if error.is_transient() {
        warn!(%error, "user repository unavailable");
        return Error::service_unavailable(format!("user storage unavailable: {error}"));
    }
    match error {
        UserPersistenceError::Conflict { message } => {
            Error::conflict(format!("user rejected by storage: {message}"))
        }
        UserPersistenceError::NoRowsAffected { user_id } => {
            Error::not_found(format!("user {user_id} not found"))
        }
        other => Error::internal(format!("user repository error: {other}")),
    }
}

async fn hash_password(password: Zeroizing<String>, cost: HashCost) -> Result<PasswordHash, Error> {
    tokio::task::spawn_blocking(move || PasswordHash::set(password.as_str(), cost))
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
        .map_err(|err| Error::internal(err.to_string()))
}

/// Service backing the user driving ports.
#[derive(Clone)]
pub struct UserService<R> {
    user_repo: Arc<R>,
    hash_cost: HashCost,
}

impl<R> UserService<R> {
    pub fn new(user_repo: Arc<R>, hash_cost: HashCost) -> Self {
        Self {
            user_repo,
            hash_cost,
        }
    }
}

#[async_trait]
impl<R> UserCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, draft: UserDraft, deadline: Deadline) -> Result<User, Error> {
        let (validated, password) = draft.validate().map_err(map_validation_error)?;
        let password_hash = hash_password(password, self.hash_cost).await?;

        let new_user = NewUser {
            username: validated.username,
            email: validated.email,
            password_hash,
            bio: validated.bio,
        };
        let user = self
            .user_repo
            .create(&new_user, deadline)
            .await
            .map_err(map_persistence_error)?;

        info!(user_id = %user.id(), username = %user.username(), "user created");
        Ok(user)
    }

    async fn update_user(
        &self,
        request: UserUpdateRequest,
        deadline: Deadline,
    ) -> Result<User, Error> {
        let update = UserUpdate {
            id: request.id,
            username: Username::new(&request.username).map_err(map_validation_error)?,
            email: Email::new(&request.email).map_err(map_validation_error)?,
            bio: request.bio,
        };
        let user = self
            .user_repo
            .update(&update, deadline)
            .await
            .map_err(map_persistence_error)?;

        info!(user_id = %user.id(), "user updated");
        Ok(user)
    }
}

#[async_trait]
impl<R> UserQuery for UserService<R>
where
    R: UserRepository,
{
    async fn get_user_by_username(
        &self,
        username: &str,
        deadline: Deadline,
    ) -> Result<Option<User>, Error> {
        let Ok(username) = Username::new(username) else {
            // No stored row can carry a blank or overlong username.
            return Ok(None);
        };
        self.user_repo
            .find_by_username(&username, deadline)
            .await
            .map_err(map_persistence_error)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
