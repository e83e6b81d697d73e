//! API route handlers

pub mod health;
pub mod login;
pub mod users;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the full application router.
///
/// The route table is the single place a (method, path) pair maps onto
/// a handler; path ids are typed inside the user handlers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::home))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/user/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/search", get(users::search_users))
        .route("/login", post(login::login))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
