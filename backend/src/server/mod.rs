//! Server construction and middleware wiring.

mod config;
mod settings;

pub use config::ServerConfig;
pub use settings::{Settings, SettingsError, settings_from_env};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use roster::Trace;
#[cfg(debug_assertions)]
use roster::doc::ApiDoc;
use roster::domain::ports::{FixtureUserProjectsQuery, UserProjectsQuery};
use roster::inbound::http::health::{HealthState, live, ready};
use roster::inbound::http::state::HttpState;
use roster::inbound::http::users::get_user_with_projects;
use roster::outbound::persistence::DieselUserProjectsQuery;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Build the user-projects query port based on configuration.
///
/// Uses the Diesel-backed adapter when a pool is available, otherwise falls
/// back to the fixture so the server can run without a database.
fn build_user_projects_query(config: &ServerConfig) -> Arc<dyn UserProjectsQuery> {
    match &config.db_pool {
        Some(pool) => Arc::new(
            DieselUserProjectsQuery::new(pool.clone()).with_duplicate_rows(config.duplicate_rows),
        ),
        None => Arc::new(FixtureUserProjectsQuery),
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api").service(get_user_with_projects);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] containing binding and persistence settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let user_projects = build_user_projects_query(&config);
    let http_state = web::Data::new(HttpState::new(user_projects));

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
