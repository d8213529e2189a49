//! Message detail, send, and mark-read routes

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use tracing::error;

use crate::{
    error::ApiError,
    middleware::AuthUser,
    models::NewMessage,
    policy::{require_participant, require_recipient},
    state::AppState,
};

/// Fetch a message by id; participants only
pub async fn get_message(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let message = state
        .message_repository
        .get(id)
        .await
        .map_err(|e| {
            error!("Failed to fetch message: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound)?;

    require_participant(&identity, &message)?;

    Ok(Json(json!({ "message": message })))
}

/// Send a message
///
/// The sender is the verified identity, never client input. Sending to a
/// username that does not exist fails at the store and surfaces as a 500.
pub async fn create_message(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthUser>,
    Json(payload): Json<NewMessage>,
) -> Result<impl IntoResponse, ApiError> {
    let message = state
        .message_repository
        .create(&identity.username, &payload)
        .await
        .map_err(|e| {
            error!("Failed to create message: {}", e);
            ApiError::InternalServerError
        })?;

    Ok((StatusCode::CREATED, Json(json!({ "message": message }))))
}

/// Mark a message read; recipient only
///
/// Ownership is re-checked on every call. The timestamp itself is written
/// at most once.
pub async fn mark_message_read(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let message = state
        .message_repository
        .get(id)
        .await
        .map_err(|e| {
            error!("Failed to fetch message: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound)?;

    require_recipient(&identity, &message)?;

    let receipt = state
        .message_repository
        .mark_read(id)
        .await
        .map_err(|e| {
            error!("Failed to mark message read: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(json!({ "message": receipt })))
}
