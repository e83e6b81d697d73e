/// Login API route
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use roster_storage::users;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: String,
    pub message: String,
    pub user_id: i64,
}

// Well-formed bcrypt hash that matches no password. Verified when the
// email is unknown so both rejection paths do comparable work.
const DUMMY_HASH: &str = "$2b$12$C8qhXPy3EC5BQ8uqzUG5uOMPGsQwaV5L6Ej2jZDuMr0gvdueVi8hW";

/// POST /login
///
/// Both an unknown email and a wrong password answer 401 with an
/// identical body; the response never reveals which factor failed.
pub async fn login(
    State(state): State<AppState>,
    body: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(req) = body?;

    let (Some(email), Some(password)) = (
        req.email.as_deref().filter(|v| !v.is_empty()),
        req.password.as_deref().filter(|v| !v.is_empty()),
    ) else {
        return Err(ServerError::validation(
            "Missing Credentials",
            "Email and password are required.",
        ));
    };

    match users::find_credentials_by_email(&state.pool, email).await? {
        Some(creds) if state.passwords.verify(password, &creds.password_hash) => {
            tracing::info!(user_id = creds.user_id, "login successful");
            Ok(Json(LoginResponse {
                status: "success".to_string(),
                message: "Login successful!".to_string(),
                user_id: creds.user_id,
            }))
        }
        Some(_) => {
            tracing::warn!(email, "failed login attempt");
            Err(ServerError::Auth)
        }
        None => {
            let _ = state.passwords.verify(password, DUMMY_HASH);
            tracing::warn!(email, "failed login attempt");
            Err(ServerError::Auth)
        }
    }
}
