//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use roster::domain::DuplicateRows;
use roster::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) duplicate_rows: DuplicateRows,
}

impl ServerConfig {
    /// Construct a server configuration listening on `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            duplicate_rows: DuplicateRows::default(),
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server serves user rosters from the database;
    /// otherwise it falls back to the fixture port used in tests.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Select how repeated membership rows for one project are treated.
    #[must_use]
    pub fn with_duplicate_rows(mut self, policy: DuplicateRows) -> Self {
        self.duplicate_rows = policy;
        self
    }
}
