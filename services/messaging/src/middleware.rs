//! Middleware for bearer token validation and identity attachment

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::error;

use crate::{error::ApiError, state::AppState};

/// Identity of the authenticated caller, taken from a verified token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

/// Extract and validate the JWT from the Authorization header
///
/// On success the verified identity is inserted into the request
/// extensions, so handlers receive it with `Extension<AuthUser>`. Any
/// missing, malformed, or invalid token is rejected before route logic
/// runs.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    let claims = state.jwt_service.validate_token(token).map_err(|e| {
        error!("Failed to validate token: {}", e);
        ApiError::Unauthorized
    })?;

    req.extensions_mut().insert(AuthUser {
        username: claims.sub,
    });

    Ok(next.run(req).await)
}
