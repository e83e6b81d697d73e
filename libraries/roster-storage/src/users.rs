//! User table queries
//!
//! Free functions over a borrowed pool; every statement is
//! parameterized and runs in its own implicit transaction.

use crate::error::Result;
use crate::StorageError;
use roster_core::User;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Credential row used by the login path.
///
/// The hash never travels further than password verification.
#[derive(Debug)]
pub struct Credentials {
    pub user_id: i64,
    pub password_hash: String,
}

/// Get all users in natural row order.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, name, email FROM users")
        .fetch_all(pool)
        .await?;

    rows.iter().map(user_from_row).collect()
}

/// Get a user by id, or a not-found error.
pub async fn get(pool: &SqlitePool, id: i64) -> Result<User> {
    let row = sqlx::query("SELECT id, name, email FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StorageError::not_found("User", id.to_string()))?;

    user_from_row(&row)
}

/// Insert a new user and return the store-assigned id.
///
/// A duplicate email surfaces as `StorageError::Conflict`.
pub async fn create(pool: &SqlitePool, name: &str, email: &str, password_hash: &str) -> Result<i64> {
    let result = sqlx::query("INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?)")
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Update name and/or email in place; returns the number of rows touched.
///
/// The UNIQUE constraint only fires when a different row already owns
/// the email, so re-submitting a user's own address is not a conflict.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    name: Option<&str>,
    email: Option<&str>,
) -> Result<u64> {
    let mut assignments = Vec::new();
    if name.is_some() {
        assignments.push("name = ?");
    }
    if email.is_some() {
        assignments.push("email = ?");
    }
    if assignments.is_empty() {
        return Ok(0);
    }

    let sql = format!("UPDATE users SET {} WHERE id = ?", assignments.join(", "));
    let mut query = sqlx::query(&sql);
    if let Some(name) = name {
        query = query.bind(name);
    }
    if let Some(email) = email {
        query = query.bind(email);
    }

    let result = query.bind(id).execute(pool).await?;
    Ok(result.rows_affected())
}

/// Hard-delete a user; returns the number of rows removed.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Case-insensitive substring search on name.
///
/// SQLite's LIKE is case-insensitive for ASCII, which is the contract
/// the search endpoint promises.
pub async fn search_by_name(pool: &SqlitePool, fragment: &str) -> Result<Vec<User>> {
    let pattern = format!("%{fragment}%");
    let rows = sqlx::query("SELECT id, name, email FROM users WHERE name LIKE ?")
        .bind(pattern)
        .fetch_all(pool)
        .await?;

    rows.iter().map(user_from_row).collect()
}

/// Fetch the id and credential hash for an email, if any.
pub async fn find_credentials_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<Credentials>> {
    let row = sqlx::query("SELECT id, password_hash FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    row.map(|row| {
        Ok(Credentials {
            user_id: row.try_get("id")?,
            password_hash: row.try_get("password_hash")?,
        })
    })
    .transpose()
}

fn user_from_row(row: &SqliteRow) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run_migrations;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    // Single connection so the in-memory database is shared across
    // statements within a test.
    async fn test_pool() -> SqlitePool {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let pool = test_pool().await;

        let id = create(&pool, "Alice", "a@x.com", "hash-a").await.unwrap();
        assert!(id > 0);

        let user = get(&pool, id).await.unwrap();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "a@x.com");
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let pool = test_pool().await;

        let err = get(&pool, 42).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let pool = test_pool().await;

        create(&pool, "Alice", "a@x.com", "hash-a").await.unwrap();
        let err = create(&pool, "Alicia", "a@x.com", "hash-b")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        // Exactly one row with that email survives.
        let users = list_all(&pool).await.unwrap();
        assert_eq!(users.iter().filter(|u| u.email == "a@x.com").count(), 1);
    }

    #[tokio::test]
    async fn update_own_email_is_not_a_conflict() {
        let pool = test_pool().await;

        let id = create(&pool, "Alice", "a@x.com", "hash-a").await.unwrap();
        let rows = update(&pool, id, None, Some("a@x.com")).await.unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn update_to_taken_email_is_a_conflict() {
        let pool = test_pool().await;

        create(&pool, "Alice", "a@x.com", "hash-a").await.unwrap();
        let bob = create(&pool, "Bob", "b@x.com", "hash-b").await.unwrap();

        let err = update(&pool, bob, None, Some("a@x.com")).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_without_fields_touches_nothing() {
        let pool = test_pool().await;

        let id = create(&pool, "Alice", "a@x.com", "hash-a").await.unwrap();
        let rows = update(&pool, id, None, None).await.unwrap();
        assert_eq!(rows, 0);

        let user = get(&pool, id).await.unwrap();
        assert_eq!(user.name, "Alice");
    }

    #[tokio::test]
    async fn delete_reports_rows_removed() {
        let pool = test_pool().await;

        let id = create(&pool, "Alice", "a@x.com", "hash-a").await.unwrap();
        assert_eq!(delete(&pool, id).await.unwrap(), 1);
        assert_eq!(delete(&pool, id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let pool = test_pool().await;

        create(&pool, "John Doe", "john@x.com", "hash-j").await.unwrap();
        create(&pool, "Jane Smith", "jane@x.com", "hash-s")
            .await
            .unwrap();

        for fragment in ["joh", "DOE", "hn d"] {
            let hits = search_by_name(&pool, fragment).await.unwrap();
            assert_eq!(hits.len(), 1, "fragment {fragment:?}");
            assert_eq!(hits[0].name, "John Doe");
        }

        let none = search_by_name(&pool, "zzz").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn credentials_lookup_by_email() {
        let pool = test_pool().await;

        let id = create(&pool, "Alice", "a@x.com", "hash-a").await.unwrap();

        let creds = find_credentials_by_email(&pool, "a@x.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(creds.user_id, id);
        assert_eq!(creds.password_hash, "hash-a");

        let missing = find_credentials_by_email(&pool, "nobody@x.com")
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
