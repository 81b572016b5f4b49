//! Diesel-backed `UserProjectsQuery` adapter.
//!
//! Issues the single left-join query for a user id and folds the flat rows
//! into the domain aggregate. The join keeps membership and project columns
//! nullable as a pair: a user without memberships still yields exactly one
//! row, with both sides absent.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::UserProjectsQuery;
use crate::domain::{
    DuplicateRows, Error, ProjectAssociation, ProjectId, UserId, UserProjectRow, UserRecord,
    UserWithProjects, aggregate,
};

use super::models::{MembershipRow, ProjectRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{project_members, projects, users};

type JoinedRow = (UserRow, Option<MembershipRow>, Option<ProjectRow>);

/// Diesel-backed implementation of the `UserProjectsQuery` port.
#[derive(Clone)]
pub struct DieselUserProjectsQuery {
    pool: DbPool,
    duplicate_rows: DuplicateRows,
}

impl DieselUserProjectsQuery {
    /// Create an adapter over the given pool with the default duplicate-row
    /// policy.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            duplicate_rows: DuplicateRows::default(),
        }
    }

    /// Override how duplicate membership rows are treated.
    pub fn with_duplicate_rows(mut self, policy: DuplicateRows) -> Self {
        self.duplicate_rows = policy;
        self
    }
}

fn map_pool_error(error: PoolError) -> Error {
    Error::internal(error.to_string())
}

fn map_diesel_error(error: diesel::result::Error) -> Error {
    use diesel::result::Error as DieselError;

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    Error::internal(format!("user-projects query failed: {error}"))
}

fn row_to_domain(row: JoinedRow) -> Result<UserProjectRow, Error> {
    let (user, membership, project) = row;

    let id = UserId::new(user.id)
        .map_err(|err| Error::internal(format!("user row outside identifier domain: {err}")))?;
    let user = UserRecord {
        id,
        username: user.username,
        email: user.email,
        created_at: user.created_at,
        updated_at: user.updated_at,
    };

    let project = match (membership, project) {
        (Some(membership), Some(project)) => Some(project_association(membership, project)?),
        (None, None) => None,
        // The membership and project sides come from the same inner join, so
        // one without the other means the query shape regressed.
        _ => {
            return Err(Error::internal(
                "user-projects join returned a half-populated project side",
            ));
        }
    };

    Ok(UserProjectRow { user, project })
}

fn project_association(
    membership: MembershipRow,
    project: ProjectRow,
) -> Result<ProjectAssociation, Error> {
    let project_id = ProjectId::new(project.id)
        .map_err(|err| Error::internal(format!("project row outside identifier domain: {err}")))?;

    Ok(ProjectAssociation {
        project_id,
        project_name: project.project_name,
        description: project.description,
        created_at: project.created_at,
        updated_at: project.updated_at,
        role: membership.role,
        assigned_at: membership.assigned_at,
    })
}

#[async_trait]
impl UserProjectsQuery for DieselUserProjectsQuery {
    async fn fetch_user_with_projects(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserWithProjects>, Error> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<JoinedRow> = users::table
            .left_join(project_members::table.inner_join(projects::table))
            .filter(users::id.eq(user_id.get()))
            .select((
                UserRow::as_select(),
                Option::<MembershipRow>::as_select(),
                Option::<ProjectRow>::as_select(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows = rows
            .into_iter()
            .map(row_to_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(aggregate(rows, self.duplicate_rows))
    }
}
