//! Environment-driven process settings.
//!
//! Centralises every variable the binary reads so values are validated
//! consistently and the parsing can be tested in isolation against a mock
//! environment.

use std::net::SocketAddr;
use std::time::Duration;

use mockable::Env;
use roster::domain::DuplicateRows;

const DATABASE_URL_ENV: &str = "DATABASE_URL";
const BIND_ADDR_ENV: &str = "BIND_ADDR";
const POOL_MAX_SIZE_ENV: &str = "DB_POOL_MAX_SIZE";
const POOL_MIN_IDLE_ENV: &str = "DB_POOL_MIN_IDLE";
const CONNECT_TIMEOUT_ENV: &str = "DB_CONNECT_TIMEOUT_SECS";
const DUPLICATE_ROWS_ENV: &str = "DUPLICATE_PROJECT_ROWS";
const RUN_MIGRATIONS_ENV: &str = "RUN_MIGRATIONS";

const SOCKET_ADDR_EXPECTED: &str = "a socket address such as 0.0.0.0:8080";
const POSITIVE_INT_EXPECTED: &str = "a positive integer";
const SECONDS_EXPECTED: &str = "a number of seconds";
const POLICY_EXPECTED: &str = "preserve|collapse";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while validating process settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Validated process settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// PostgreSQL connection URL. Required.
    pub database_url: String,
    /// Listener address, defaulting to `0.0.0.0:8080`.
    pub bind_addr: SocketAddr,
    /// Maximum pool size, defaulting to 10.
    pub pool_max_size: u32,
    /// Idle connections to maintain, defaulting to 2.
    pub pool_min_idle: u32,
    /// Pool checkout timeout, defaulting to 30 seconds.
    pub connect_timeout: Duration,
    /// Duplicate membership row policy, defaulting to preserve.
    pub duplicate_rows: DuplicateRows,
    /// Whether to apply embedded migrations at startup, defaulting to off.
    pub run_migrations: bool,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Read a variable, falling back to `default` when unset and reporting an
/// invalid-value error when `parse` rejects it.
fn parse_env<E, T, F>(
    env: &E,
    name: &'static str,
    expected: &'static str,
    default: T,
    parse: F,
) -> Result<T, SettingsError>
where
    E: Env,
    F: FnOnce(&str) -> Option<T>,
{
    match env.string(name) {
        Some(value) => parse(&value).ok_or(SettingsError::InvalidEnv {
            name,
            value,
            expected,
        }),
        None => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Build process settings from environment variables.
pub fn settings_from_env<E: Env>(env: &E) -> Result<Settings, SettingsError> {
    let database_url = env.string(DATABASE_URL_ENV).ok_or(SettingsError::MissingEnv {
        name: DATABASE_URL_ENV,
    })?;

    let bind_addr = parse_env(
        env,
        BIND_ADDR_ENV,
        SOCKET_ADDR_EXPECTED,
        default_bind_addr(),
        |value| value.parse().ok(),
    )?;

    let pool_max_size = parse_env(
        env,
        POOL_MAX_SIZE_ENV,
        POSITIVE_INT_EXPECTED,
        DEFAULT_POOL_MAX_SIZE,
        |value| value.parse::<u32>().ok().filter(|size| *size >= 1),
    )?;

    let pool_min_idle = parse_env(
        env,
        POOL_MIN_IDLE_ENV,
        POSITIVE_INT_EXPECTED,
        DEFAULT_POOL_MIN_IDLE,
        |value| value.parse::<u32>().ok().filter(|size| *size >= 1),
    )?;

    let connect_timeout = parse_env(
        env,
        CONNECT_TIMEOUT_ENV,
        SECONDS_EXPECTED,
        Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        |value| value.parse::<u64>().ok().map(Duration::from_secs),
    )?;

    let duplicate_rows = parse_env(
        env,
        DUPLICATE_ROWS_ENV,
        POLICY_EXPECTED,
        DuplicateRows::default(),
        |value| value.parse().ok(),
    )?;

    let run_migrations = parse_env(env, RUN_MIGRATIONS_ENV, BOOL_EXPECTED, false, parse_bool)?;

    Ok(Settings {
        database_url,
        bind_addr,
        pool_max_size,
        pool_min_idle,
        connect_timeout,
        duplicate_rows,
        run_migrations,
    })
}
