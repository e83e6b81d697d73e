/// Shared application state
use crate::services::PasswordService;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// Handlers hold no mutable state of their own; the pool is the only
/// shared resource and hands out one connection per statement.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub passwords: Arc<PasswordService>,
}

impl AppState {
    pub fn new(pool: SqlitePool, passwords: Arc<PasswordService>) -> Self {
        Self { pool, passwords }
    }
}
