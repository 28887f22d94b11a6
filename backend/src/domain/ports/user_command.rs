//! Driving port for user account mutations.

use async_trait::async_trait;

use crate::domain::{Deadline, Error, User, UserDraft, UserId};

/// Profile changes requested by a caller, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdateRequest {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub bio: String,
}

/// Driving port for registering and editing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Validate, hash the password and store a new user.
    async fn create_user(&self, draft: UserDraft, deadline: Deadline) -> Result<User, Error>;

    /// Update profile fields; a missing id is [`crate::domain::ErrorCode::NotFound`].
    async fn update_user(
        &self,
        request: UserUpdateRequest,
        deadline: Deadline,
    ) -> Result<User, Error>;
}
