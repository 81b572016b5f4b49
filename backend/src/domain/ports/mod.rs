//! Domain ports for the hexagonal boundary.

mod user_projects_query;

pub use user_projects_query::{FixtureUserProjectsQuery, UserProjectsQuery};
