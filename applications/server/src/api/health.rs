/// Health check API routes
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub message: String,
}

/// GET / - Health check endpoint
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Roster user management API is running".to_string(),
    })
}
