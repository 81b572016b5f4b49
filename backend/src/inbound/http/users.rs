//! User roster API handlers.
//!
//! ```text
//! GET /api/user/{user_id}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, ProjectAssociation, UserId, UserWithProjects};
use crate::inbound::http::error::{ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

/// Response payload for one project association.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    #[schema(example = 3)]
    pub project_id: i64,
    #[schema(example = "Atlas")]
    pub project_name: String,
    pub description: String,
    /// RFC 3339 timestamp.
    pub created_at: String,
    /// RFC 3339 timestamp.
    pub updated_at: String,
    #[schema(example = "owner")]
    pub role: String,
    /// RFC 3339 timestamp.
    pub assigned_at: String,
}

impl From<ProjectAssociation> for ProjectResponse {
    fn from(value: ProjectAssociation) -> Self {
        Self {
            project_id: value.project_id.get(),
            project_name: value.project_name,
            description: value.description,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
            role: value.role,
            assigned_at: value.assigned_at.to_rfc3339(),
        }
    }
}

/// Response payload for a user together with their project associations.
///
/// `projects` is always present; a user without memberships gets an empty
/// array rather than a missing field.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserWithProjectsResponse {
    #[schema(example = 7)]
    pub id: i64,
    #[schema(example = "ann")]
    pub username: String,
    #[schema(example = "ann@example.com")]
    pub email: String,
    /// RFC 3339 timestamp.
    pub created_at: String,
    /// RFC 3339 timestamp.
    pub updated_at: String,
    pub projects: Vec<ProjectResponse>,
}

impl From<UserWithProjects> for UserWithProjectsResponse {
    fn from(value: UserWithProjects) -> Self {
        Self {
            id: value.user.id.get(),
            username: value.user.username,
            email: value.user.email,
            created_at: value.user.created_at.to_rfc3339(),
            updated_at: value.user.updated_at.to_rfc3339(),
            projects: value.projects.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserPath {
    user_id: String,
}

/// Parse and validate the path segment before any storage work happens.
///
/// The segment is extracted as a string so a malformed id produces the same
/// JSON error envelope as every other failure instead of the framework's
/// default body.
fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse::<i64>()
        .ok()
        .and_then(|value| UserId::new(value).ok())
        .ok_or_else(|| {
            Error::invalid_request(format!("user_id must be a positive integer, got '{raw}'"))
        })
}

/// Fetch one user together with their project associations.
#[utoipa::path(
    get,
    path = "/api/user/{user_id}",
    params(
        ("user_id" = String, Path, description = "User identifier, a positive integer")
    ),
    responses(
        (status = 200, description = "User with projects", body = UserWithProjectsResponse),
        (status = 400, description = "Malformed user id", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getUserWithProjects"
)]
#[get("/user/{user_id}")]
pub async fn get_user_with_projects(
    state: web::Data<HttpState>,
    path: web::Path<UserPath>,
) -> ApiResult<web::Json<UserWithProjectsResponse>> {
    let user_id = parse_user_id(&path.user_id)?;
    match state.user_projects.fetch_user_with_projects(user_id).await? {
        Some(found) => Ok(web::Json(UserWithProjectsResponse::from(found))),
        None => Err(Error::not_found("User not found")),
    }
}
