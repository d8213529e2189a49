//! Registration and login routes

use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use tracing::{error, info};

use crate::{
    error::ApiError,
    models::{LoginCredentials, NewUser},
    state::AppState,
};

/// Response carrying a freshly issued token
#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// User login endpoint
///
/// Issues a token and refreshes the last-login timestamp. Unknown users
/// and wrong passwords get the same answer.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginCredentials>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Login attempt for user: {}", payload.username);

    let user = state
        .user_repository
        .find_by_username(&payload.username)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::BadRequest("Invalid username/password".to_string()))?;

    let is_valid = state
        .user_repository
        .verify_password(&user, &payload.password)
        .await
        .map_err(|e| {
            error!("Failed to verify password: {}", e);
            ApiError::InternalServerError
        })?;

    if !is_valid {
        return Err(ApiError::BadRequest("Invalid username/password".to_string()));
    }

    let token = state
        .jwt_service
        .generate_token(&user.username)
        .map_err(|e| {
            error!("Failed to generate token: {}", e);
            ApiError::InternalServerError
        })?;

    state
        .user_repository
        .update_login_timestamp(&user.username)
        .await
        .map_err(|e| {
            error!("Failed to update login timestamp: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(TokenResponse { token }))
}

/// Registration endpoint; creates the user, logs them in, returns a token
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Registering user: {}", payload.username);

    let user = state.user_repository.create(&payload).await.map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::BadRequest("Username is taken. Please pick another one.".to_string())
        } else {
            error!("Failed to register user: {}", e);
            ApiError::InternalServerError
        }
    })?;

    let token = state
        .jwt_service
        .generate_token(&user.username)
        .map_err(|e| {
            error!("Failed to generate token: {}", e);
            ApiError::InternalServerError
        })?;

    state
        .user_repository
        .update_login_timestamp(&user.username)
        .await
        .map_err(|e| {
            error!("Failed to update login timestamp: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(TokenResponse { token }))
}

/// Duplicate usernames surface as a unique-constraint violation
fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|db| db.is_unique_violation())
}
