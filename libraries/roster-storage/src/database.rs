/// Pool construction and startup migrations
use crate::error::Result;
use crate::StorageError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Open a connection pool for the given database URL.
///
/// The database file is created if it does not exist. Handlers borrow
/// a connection from this pool for the duration of one statement;
/// release is guaranteed on every exit path by the pool's RAII guard.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Run database migrations.
///
/// Migrations are embedded so the binary carries its own schema.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    const MIGRATIONS: &[&str] = &[include_str!("../migrations/0001_create_users.sql")];

    for migration in MIGRATIONS {
        sqlx::query(migration)
            .execute(pool)
            .await
            .map_err(|e| StorageError::Migration(e.to_string()))?;
    }

    Ok(())
}
