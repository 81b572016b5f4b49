//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (users, health)
//! - **Schemas**: Response bodies for the user roster and the error envelope
//!
//! The generated specification is served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::ErrorBody;
use crate::inbound::http::users::{ProjectResponse, UserWithProjectsResponse};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        description = "HTTP interface for user project rosters and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::get_user_with_projects,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(UserWithProjectsResponse, ProjectResponse, ErrorBody)),
    tags(
        (name = "users", description = "Operations related to users and their projects"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
