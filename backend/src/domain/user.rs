//! User data model.

use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use super::password::PasswordHash;

/// Maximum username length accepted by the `users.username` column.
pub const USERNAME_MAX: usize = 50;
/// Maximum email length accepted by the `users.email` column.
pub const EMAIL_MAX: usize = 255;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooLong { max: usize },
    EmptyEmail,
    InvalidEmail,
    EmailTooLong { max: usize },
    EmptyPassword,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must look like local@domain"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Database-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique login handle, trimmed of surrounding whitespace.
///
/// # Examples
/// ```
/// use backend::domain::Username;
///
/// let name = Username::new("  ada ")?;
/// assert_eq!(name.as_ref(), "ada");
/// # Ok::<(), backend::domain::UserValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(value: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contact address with a non-empty local part and domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(value: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        match trimmed.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(UserValidationError::InvalidEmail),
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registration payload. The password is wiped from memory on drop.
#[derive(Clone)]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub password: Zeroizing<String>,
    pub bio: String,
}

impl fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDraft")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("bio", &self.bio)
            .finish()
    }
}

/// Validated registration fields; the password is still plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUserDraft {
    pub username: Username,
    pub email: Email,
    pub bio: String,
}

impl UserDraft {
    /// Check the identity fields and that a password was supplied.
    ///
    /// Returns the validated identity alongside the untouched password so the
    /// caller can hash it.
    pub fn validate(self) -> Result<(ValidatedUserDraft, Zeroizing<String>), UserValidationError> {
        let username = Username::new(&self.username)?;
        let email = Email::new(&self.email)?;
        if self.password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok((
            ValidatedUserDraft {
                username,
                email,
                bio: self.bio,
            },
            self.password,
        ))
    }
}

/// A user ready for insertion: identity plus an already-hashed password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub bio: String,
}

/// Profile fields replaced by an update. The id selects the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub bio: String,
}

/// Stored user account.
///
/// The password hash is only reachable through [`User::password_hash`]; no
/// adapter serialises it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    email: Email,
    password_hash: PasswordHash,
    bio: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Column values read back from storage.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub bio: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(value: UserRecord) -> Self {
        Self {
            id: value.id,
            username: value.username,
            email: value.email,
            password_hash: value.password_hash,
            bio: value.bio,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl User {
    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn bio(&self) -> &str {
        self.bio.as_str()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
