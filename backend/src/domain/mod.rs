//! Domain types and the row-folding core of the roster service.
//!
//! Everything here is transport- and storage-agnostic. Identifier newtypes
//! carry their validation with them; [`user_projects::aggregate`] turns the
//! flat join rows a store returns into the aggregate the API serves; the
//! `ports` module defines the seams adapters plug into.

pub mod error;
pub mod ports;
pub mod project;
pub mod user;
pub mod user_projects;

pub use self::error::{Error, ErrorCode};
pub use self::project::{ProjectAssociation, ProjectId, ProjectIdError};
pub use self::user::{UserId, UserIdError, UserRecord};
pub use self::user_projects::{
    DuplicateRows, ParseDuplicateRowsError, UserProjectRow, UserWithProjects, aggregate,
};
