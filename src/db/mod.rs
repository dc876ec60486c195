//! Database module
//!
//! Handles SQLite connection and migrations for the user profile store.

pub mod connection;
pub mod migrations;

pub use connection::{database_path, Database, DbError, DbResult};
