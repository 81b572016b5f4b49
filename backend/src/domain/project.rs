//! Project association data model.

use std::fmt;

use chrono::{DateTime, Utc};

/// Validation errors returned by [`ProjectId::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectIdError {
    /// Zero or negative input. Auto-increment keys start at 1.
    OutOfRange { value: i64 },
}

impl fmt::Display for ProjectIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { value } => {
                write!(f, "project id must be a positive integer, got {value}")
            }
        }
    }
}

impl std::error::Error for ProjectIdError {}

/// Stable project identifier, always in the store's key domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(i64);

impl ProjectId {
    /// Validate and construct a [`ProjectId`].
    pub fn new(value: i64) -> Result<Self, ProjectIdError> {
        if value < 1 {
            return Err(ProjectIdError::OutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Access the raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ProjectId> for i64 {
    fn from(value: ProjectId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for ProjectId {
    type Error = ProjectIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// One project as seen from a single user's membership.
///
/// Combines the project's own fields with the attributes of the membership
/// relation (`role`, `assigned_at`), which belong to the pairing rather than
/// to either side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectAssociation {
    pub project_id: ProjectId,
    pub project_name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub role: String,
    pub assigned_at: DateTime<Utc>,
}
