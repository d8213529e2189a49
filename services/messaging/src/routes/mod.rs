//! HTTP routes for the messaging service

use axum::{
    Json, Router,
    extract::State,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use crate::{error::ApiError, middleware::auth_middleware, state::AppState};

pub mod auth;
pub mod messages;
pub mod users;

/// Create the router for the messaging service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/users", get(users::list_users))
        .route("/users/:username", get(users::get_user))
        .route("/users/:username/to", get(users::messages_to_user))
        .route("/users/:username/from", get(users::messages_from_user))
        .route("/messages/:id", get(messages::get_message))
        .route("/messages", post(messages::create_message))
        .route("/messages/:id/read", post(messages::mark_message_read))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint; verifies the store is reachable
pub async fn health_check(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    common::database::health_check(&state.db_pool).await?;

    Ok(Json(json!({
        "status": "ok",
        "service": "messaging-service"
    })))
}
