/// Server error types
use axum::extract::rejection::JsonRejection;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_core::RosterError;
use roster_storage::StorageError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Generic 401 body text. Both login failure factors answer with these
/// exact bytes so the response never reveals which factor failed.
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid email or password.";

#[derive(Debug, Error)]
pub enum ServerError {
    /// Rejected payload: missing fields, bad email shape, weak password
    #[error("{category}: {message}")]
    Validation {
        category: &'static str,
        message: String,
    },

    /// Request body that did not parse as JSON
    #[error("Malformed request body: {0}")]
    Malformed(String),

    /// The addressed user does not exist
    #[error("User not found")]
    NotFound,

    /// Email uniqueness violation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Login rejected; carries no detail on purpose
    #[error("Invalid credentials")]
    Auth,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bcrypt error
    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// Core/storage failure, classified when rendered
    #[error(transparent)]
    Core(#[from] RosterError),
}

impl ServerError {
    /// Create a 400 validation error with its wire category.
    pub fn validation(category: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            category,
            message: message.into(),
        }
    }
}

impl From<StorageError> for ServerError {
    fn from(err: StorageError) -> Self {
        ServerError::Core(err.into())
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::Malformed(rejection.body_text())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ServerError::Validation { category, message } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": category, "message": message }),
            ),
            ServerError::Malformed(detail) => {
                tracing::debug!("rejected request body: {detail}");
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": "Invalid JSON",
                        "message": "Request body must be valid JSON.",
                    }),
                )
            }
            // The not-found body has no "error" key; existing clients
            // key off this exact shape.
            ServerError::NotFound | ServerError::Core(RosterError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, json!({ "message": "User not found" }))
            }
            ServerError::Conflict(message) => (
                StatusCode::CONFLICT,
                json!({ "error": "Conflict", "message": message }),
            ),
            ServerError::Core(RosterError::Duplicate(_)) => (
                StatusCode::CONFLICT,
                json!({ "error": "Conflict", "message": "Email already in use." }),
            ),
            ServerError::Auth => (
                StatusCode::UNAUTHORIZED,
                json!({ "status": "failed", "message": LOGIN_FAILED_MESSAGE }),
            ),
            ServerError::Config(ref message) => {
                tracing::error!("Config error: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Internal Server Error",
                        "message": "Something went wrong on the server.",
                    }),
                )
            }
            ServerError::Hash(ref err) => {
                tracing::error!("Bcrypt error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Internal Server Error",
                        "message": "Something went wrong on the server.",
                    }),
                )
            }
            ServerError::Core(ref err) => {
                tracing::error!("Database error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Database Error",
                        "message": "Something went wrong on the server.",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_body_has_no_error_key() {
        let response = ServerError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_not_found_maps_to_404() {
        let err: ServerError = StorageError::not_found("User", "7").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_conflict_maps_to_409() {
        let err: ServerError = StorageError::Conflict("UNIQUE constraint failed".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn validation_maps_to_400() {
        let err = ServerError::validation("Missing Data", "Name, email, and password are required.");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn auth_maps_to_401() {
        let response = ServerError::Auth.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
