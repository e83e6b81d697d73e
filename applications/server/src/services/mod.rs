//! Server-side services

pub mod password;

pub use password::PasswordService;
