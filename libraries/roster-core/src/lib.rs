//! Roster Core
//!
//! Domain types, validation rules, and the core error type shared by the
//! storage layer and the HTTP server.

pub mod error;
pub mod types;
pub mod validation;

pub use error::{Result, RosterError};
pub use types::User;
