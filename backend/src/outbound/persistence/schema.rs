//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Primary key, assigned from 1 upward.
        id -> Int8,
        /// Unique login name.
        username -> Varchar,
        /// Unique contact address.
        email -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Projects, independent of any membership.
    projects (id) {
        /// Primary key, assigned from 1 upward.
        id -> Int8,
        /// Display name of the project.
        project_name -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Membership relation binding users to projects.
    project_members (user_id, project_id) {
        /// References `users.id`.
        user_id -> Int8,
        /// References `projects.id`.
        project_id -> Int8,
        /// Role the user holds in this project.
        role -> Varchar,
        /// When the membership was granted.
        assigned_at -> Timestamptz,
    }
}

diesel::joinable!(project_members -> users (user_id));
diesel::joinable!(project_members -> projects (project_id));

diesel::allow_tables_to_appear_in_same_query!(users, projects, project_members);
