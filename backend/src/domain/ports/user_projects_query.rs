//! Driving port for the user-with-projects read path.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch the aggregate
//! without importing outbound persistence concerns. Production backs it with
//! the Diesel adapter; tests and database-less runs use deterministic
//! in-memory implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    DuplicateRows, Error, ProjectAssociation, ProjectId, UserId, UserProjectRow, UserRecord,
    UserWithProjects, aggregate,
};

/// Domain use-case port for fetching one user together with their projects.
#[async_trait]
pub trait UserProjectsQuery: Send + Sync {
    /// Fetch the aggregate for `user_id`.
    ///
    /// `Ok(None)` means the id matched no user, which adapters surface as
    /// not-found. A user with no memberships is `Ok(Some(...))` with an
    /// empty project list.
    async fn fetch_user_with_projects(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserWithProjects>, Error>;
}

/// Deterministic fixture serving one canned user, used for runs without a
/// configured database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserProjectsQuery;

const FIXTURE_USER_ID: i64 = 1;
const FIXTURE_PROJECT_ID: i64 = 1;

#[async_trait]
impl UserProjectsQuery for FixtureUserProjectsQuery {
    async fn fetch_user_with_projects(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserWithProjects>, Error> {
        if user_id.get() != FIXTURE_USER_ID {
            return Ok(None);
        }

        // These values are compile-time constants; surface invalid data as an
        // internal error so automated checks catch accidental regressions.
        let id = UserId::new(FIXTURE_USER_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
        let project_id = ProjectId::new(FIXTURE_PROJECT_ID)
            .map_err(|err| Error::internal(format!("invalid fixture project id: {err}")))?;
        let epoch = DateTime::<Utc>::UNIX_EPOCH;

        let user = UserRecord {
            id,
            username: "ada".to_owned(),
            email: "ada@example.com".to_owned(),
            created_at: epoch,
            updated_at: epoch,
        };
        let project = ProjectAssociation {
            project_id,
            project_name: "Fixture Project".to_owned(),
            description: "Stands in while persistence is not configured".to_owned(),
            created_at: epoch,
            updated_at: epoch,
            role: "owner".to_owned(),
            assigned_at: epoch,
        };

        let row = UserProjectRow {
            user,
            project: Some(project),
        };
        Ok(aggregate([row], DuplicateRows::Preserve))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_serves_the_canned_user() {
        let query = FixtureUserProjectsQuery;
        let user_id = UserId::new(FIXTURE_USER_ID).expect("fixture user id");

        let found = query
            .fetch_user_with_projects(user_id)
            .await
            .expect("fixture query succeeds")
            .expect("fixture user exists");

        assert_eq!(found.user.username, "ada");
        assert_eq!(found.projects.len(), 1);
        assert_eq!(found.projects[0].role, "owner");
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_reports_other_ids_as_absent() {
        let query = FixtureUserProjectsQuery;
        let user_id = UserId::new(99).expect("valid user id");

        let found = query
            .fetch_user_with_projects(user_id)
            .await
            .expect("fixture query succeeds");

        assert_eq!(found, None);
    }
}
