//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::UserProjectsQuery;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub user_projects: Arc<dyn UserProjectsQuery>,
}

impl HttpState {
    /// Construct state around the given port implementation.
    pub fn new(user_projects: Arc<dyn UserProjectsQuery>) -> Self {
        Self { user_projects }
    }
}
