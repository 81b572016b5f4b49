//! Embedded schema migrations.
//!
//! Migrations compile into the binary so a deployment needs no separate
//! migration artifact. Application is opt-in at startup; the harness runs on
//! a dedicated blocking thread because it drives a synchronous connection.

use diesel::Connection;
use diesel_async::AsyncPgConnection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Could not establish the migration connection.
    #[error("failed to connect for migrations: {0}")]
    Connection(#[from] diesel::ConnectionError),

    /// A migration failed while running.
    #[error("failed to apply migrations: {0}")]
    Apply(String),

    /// The blocking migration task did not complete.
    #[error("migration task failed: {0}")]
    Join(String),
}

/// Apply all pending migrations against `database_url`.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let database_url = database_url.to_owned();
    tokio::task::spawn_blocking(move || -> Result<(), MigrationError> {
        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&database_url)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| MigrationError::Apply(err.to_string()))?;
        for version in applied {
            info!(migration = %version, "applied migration");
        }
        Ok(())
    })
    .await
    .map_err(|err| MigrationError::Join(err.to_string()))?
}
