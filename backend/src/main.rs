//! Roster entry-point: wires the user-roster REST endpoint and OpenAPI docs.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use roster::inbound::http::health::HealthState;
use roster::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, Settings, create_server, settings_from_env};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = settings_from_env(&DefaultEnv::default()).map_err(std::io::Error::other)?;

    if settings.run_migrations {
        run_pending_migrations(&settings.database_url)
            .await
            .map_err(std::io::Error::other)?;
    }

    let pool = connect(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(settings.bind_addr)
        .with_db_pool(pool)
        .with_duplicate_rows(settings.duplicate_rows);

    info!(addr = %settings.bind_addr, "listening");
    create_server(health_state, config)?.await
}

/// Build the connection pool and check the database answers before the
/// listener opens. Startup aborts when it is unreachable.
async fn connect(settings: &Settings) -> std::io::Result<DbPool> {
    let config = PoolConfig::new(&settings.database_url)
        .with_max_size(settings.pool_max_size)
        .with_min_idle(Some(settings.pool_min_idle))
        .with_connection_timeout(settings.connect_timeout);

    let pool = DbPool::new(config).await.map_err(std::io::Error::other)?;
    pool.get().await.map_err(std::io::Error::other)?;
    info!("connected to roster database");
    Ok(pool)
}
