//! Roster Server Library
//!
//! User management HTTP service: CRUD plus login over a single SQLite
//! table.
//!
//! This library exposes the router and its collaborators so the
//! integration tests drive the real application.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::PasswordService;
pub use state::AppState;
