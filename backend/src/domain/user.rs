//! User data model.

use std::fmt;

use chrono::{DateTime, Utc};

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserIdError {
    /// Zero or negative input. Auto-increment keys start at 1.
    OutOfRange { value: i64 },
}

impl fmt::Display for UserIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { value } => {
                write!(f, "user id must be a positive integer, got {value}")
            }
        }
    }
}

impl std::error::Error for UserIdError {}

/// Stable user identifier.
///
/// The store assigns identifiers from 1 upward, so the full `i64` range is
/// never valid input. Constructing one proves the value is in domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(value: i64) -> Result<Self, UserIdError> {
        if value < 1 {
            return Err(UserIdError::OutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Access the raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A stored user, independent of any project association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
