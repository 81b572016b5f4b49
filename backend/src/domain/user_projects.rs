//! User-with-projects aggregation.
//!
//! The roster read path issues one left-join query and gets back a flat row
//! sequence: the user's columns repeated on every row, the project side
//! populated only where a membership exists. This module folds that sequence
//! into the nested aggregate the API serves, distinguishing "user absent"
//! (no rows at all) from "user with no projects" (one row with an empty
//! project side).

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::domain::{ProjectAssociation, UserRecord};

/// One row of the flattened user-projects join.
///
/// `project` is `None` when the left join found no membership for this row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProjectRow {
    pub user: UserRecord,
    pub project: Option<ProjectAssociation>,
}

/// The aggregate served for one user: the user plus the project associations
/// the join produced, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithProjects {
    pub user: UserRecord,
    pub projects: Vec<ProjectAssociation>,
}

/// How to treat rows that repeat a project id for the same user.
///
/// A clean membership relation never produces them, but a store without the
/// uniqueness constraint can. `Preserve` mirrors the rows as the join
/// returned them; `Collapse` keeps the first occurrence of each project id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateRows {
    #[default]
    Preserve,
    Collapse,
}

/// Error returned when parsing a [`DuplicateRows`] policy fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseDuplicateRowsError;

impl fmt::Display for ParseDuplicateRowsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected 'preserve' or 'collapse'")
    }
}

impl std::error::Error for ParseDuplicateRowsError {}

impl FromStr for DuplicateRows {
    type Err = ParseDuplicateRowsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preserve" => Ok(Self::Preserve),
            "collapse" => Ok(Self::Collapse),
            _ => Err(ParseDuplicateRowsError),
        }
    }
}

impl fmt::Display for DuplicateRows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preserve => write!(f, "preserve"),
            Self::Collapse => write!(f, "collapse"),
        }
    }
}

/// Fold an ordered row sequence for one user id into the aggregate.
///
/// Returns `None` for an empty sequence: the id matched no user, which is a
/// different outcome from a user with an empty project list. The user record
/// is taken from the first row alone; every row's project side is appended
/// in arrival order, subject to `policy`. Rows with an empty project side
/// contribute nothing to the list.
pub fn aggregate<I>(rows: I, policy: DuplicateRows) -> Option<UserWithProjects>
where
    I: IntoIterator<Item = UserProjectRow>,
{
    let mut rows = rows.into_iter();
    let first = rows.next()?;

    let user = first.user;
    let mut projects = Vec::new();
    let mut seen = HashSet::new();
    let associations = first
        .project
        .into_iter()
        .chain(rows.filter_map(|row| row.project));
    for association in associations {
        if policy == DuplicateRows::Collapse && !seen.insert(association.project_id) {
            continue;
        }
        projects.push(association);
    }

    Some(UserWithProjects { user, projects })
}
