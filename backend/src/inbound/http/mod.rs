//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod state;
pub mod users;

pub use error::{ApiResult, ErrorBody};
