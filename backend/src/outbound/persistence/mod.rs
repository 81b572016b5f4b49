//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain ports backed by PostgreSQL via
//! Diesel, with async support through `diesel-async` and `bb8` pooling.
//!
//! The adapters stay thin: they translate between Diesel row structs and
//! domain types and map database errors to domain errors. Row structs
//! (`models`) and table definitions (`schema`) are internal implementation
//! details, never exposed to the domain layer.

mod diesel_user_projects_query;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_projects_query::DieselUserProjectsQuery;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
