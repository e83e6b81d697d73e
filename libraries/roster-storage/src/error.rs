/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Uniqueness constraint violation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(sqlx::Error),
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        // UNIQUE violations are their own class: both create and update
        // surface them as a conflict rather than a generic store failure.
        if let sqlx::Error::Database(ref db) = err {
            if db.is_unique_violation() {
                return StorageError::Conflict(db.message().to_string());
            }
        }
        StorageError::Database(err)
    }
}

impl From<StorageError> for roster_core::RosterError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => {
                roster_core::RosterError::NotFound { entity, id }
            }
            StorageError::Conflict(msg) => roster_core::RosterError::Duplicate(msg),
            other => roster_core::RosterError::storage(other.to_string()),
        }
    }
}
