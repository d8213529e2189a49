//! User listing, profile, and per-user message routes

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;
use tracing::error;

use crate::{
    error::ApiError, middleware::AuthUser, policy::require_same_user, state::AppState,
};

/// List every user's public summary; any authenticated identity may call
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = state.user_repository.all().await.map_err(|e| {
        error!("Failed to list users: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(json!({ "users": users })))
}

/// Fetch a user's profile
///
/// Only that user may view it; a username that does not exist gets the
/// same 401 as a mismatch.
pub async fn get_user(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthUser>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    require_same_user(&identity, &username)?;

    let user = state
        .user_repository
        .profile(&username)
        .await
        .map_err(|e| {
            error!("Failed to fetch user profile: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(json!({ "user": user })))
}

/// List messages addressed to the user named in the path
pub async fn messages_to_user(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthUser>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    require_same_user(&identity, &username)?;

    let messages = state
        .message_repository
        .to_user(&username)
        .await
        .map_err(|e| {
            error!("Failed to list inbound messages: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(json!({ "messages": messages })))
}

/// List messages sent by the user named in the path
pub async fn messages_from_user(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthUser>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    require_same_user(&identity, &username)?;

    let messages = state
        .message_repository
        .from_user(&username)
        .await
        .map_err(|e| {
            error!("Failed to list outbound messages: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(json!({ "messages": messages })))
}
