//! Domain types

mod user;

pub use user::User;
