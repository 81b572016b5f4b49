//! Internal Diesel row structs for the roster read path.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for the join query.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{project_members, projects, users};

/// Row struct for reading the user side of the join.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for the project columns of the join.
///
/// Selected as `Option<ProjectRow>`: absent whenever the left join found no
/// membership for the row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub id: i64,
    pub project_name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for the membership columns of the join.
///
/// Selected as `Option<MembershipRow>`, absent together with [`ProjectRow`].
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = project_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MembershipRow {
    pub role: String,
    pub assigned_at: DateTime<Utc>,
}
