//! Roster Storage
//!
//! SQLite access for the user table: pool construction, startup
//! migrations, and the query module for user rows.

mod database;
pub mod error;
pub mod users;

pub use database::{create_pool, run_migrations};
pub use error::StorageError;
