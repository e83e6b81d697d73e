/// User CRUD API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use roster_core::{validation, User};
use roster_storage::{users, StorageError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
}

/// GET /users
/// List all users, credential hash excluded by construction
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UsersResponse>> {
    let users = users::list_all(&state.pool).await?;
    Ok(Json(UsersResponse { users }))
}

/// GET /user/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserResponse>> {
    let id = parse_user_id(&raw_id)?;
    let user = users::get(&state.pool, id).await?;
    Ok(Json(UserResponse { user }))
}

/// POST /users
/// Create a new user; the password is hashed before it touches the store
pub async fn create_user(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUserResponse>)> {
    let Json(req) = body?;

    let missing = validation::missing_fields(&[
        ("name", req.name.as_deref()),
        ("email", req.email.as_deref()),
        ("password", req.password.as_deref()),
    ]);
    if !missing.is_empty() {
        return Err(ServerError::validation(
            "Missing Data",
            "Name, email, and password are required.",
        ));
    }

    let name = req.name.as_deref().unwrap_or_default();
    let email = req.email.as_deref().unwrap_or_default();
    let password = req.password.as_deref().unwrap_or_default();

    if !validation::is_valid_email(email) {
        return Err(ServerError::validation(
            "Invalid Email",
            "Please provide a valid email address.",
        ));
    }

    if !validation::is_strong_password(password) {
        return Err(ServerError::validation(
            "Weak Password",
            format!(
                "Password must be at least {} characters long.",
                validation::MIN_PASSWORD_LEN
            ),
        ));
    }

    let password_hash = state.passwords.hash(password)?;

    let id = users::create(&state.pool, name, email, &password_hash)
        .await
        .map_err(|e| conflict_or(e, "User with this email already exists."))?;

    tracing::info!(id, email, "user created");

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            message: "User created successfully!".to_string(),
            id,
        }),
    ))
}

/// PUT /user/:id
/// Update name and/or email; the credential is immutable here
pub async fn update_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: std::result::Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let id = parse_user_id(&raw_id)?;
    let Json(req) = body?;

    let name = non_empty(req.name.as_deref());
    let email = non_empty(req.email.as_deref());

    if name.is_none() && email.is_none() {
        return Err(ServerError::validation(
            "No Data",
            "At least 'name' or 'email' must be provided for update.",
        ));
    }

    if let Some(email) = email {
        if !validation::is_valid_email(email) {
            return Err(ServerError::validation(
                "Invalid Email",
                "Please provide a valid email address.",
            ));
        }
    }

    // Existence check first so an unknown id answers 404, not 200.
    users::get(&state.pool, id).await?;

    users::update(&state.pool, id, name, email)
        .await
        .map_err(|e| conflict_or(e, "Email already in use by another user."))?;

    tracing::info!(id, "user updated");

    Ok(Json(MessageResponse {
        message: "User updated successfully!".to_string(),
    }))
}

/// DELETE /user/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_user_id(&raw_id)?;

    let removed = users::delete(&state.pool, id).await?;
    if removed == 0 {
        return Err(ServerError::NotFound);
    }

    tracing::info!(id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /search?name=...
/// Case-insensitive substring search; zero matches is still a 200
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<UsersResponse>> {
    let Some(fragment) = non_empty(params.name.as_deref()) else {
        return Err(ServerError::validation(
            "Missing Parameter",
            "Please provide a 'name' query parameter to search.",
        ));
    };

    let users = users::search_by_name(&state.pool, fragment).await?;
    Ok(Json(UsersResponse { users }))
}

// Ids are typed at the routing boundary: anything that is not a
// positive integer never names a user, so it answers the not-found
// body rather than a 400.
fn parse_user_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(ServerError::NotFound)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn conflict_or(err: StorageError, conflict_message: &str) -> ServerError {
    match err {
        StorageError::Conflict(_) => ServerError::Conflict(conflict_message.to_string()),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_ids_are_typed() {
        assert_eq!(parse_user_id("7").unwrap(), 7);
        assert!(parse_user_id("abc").is_err());
        assert!(parse_user_id("").is_err());
        assert!(parse_user_id("0").is_err());
        assert!(parse_user_id("-3").is_err());
        assert!(parse_user_id("1.5").is_err());
    }

    #[test]
    fn empty_strings_do_not_count_as_fields() {
        assert_eq!(non_empty(Some("x")), Some("x"));
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(None), None);
    }
}
