//! Bearer token gate for admin routes

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Rejects the request unless it carries a valid admin token.
/// Verified claims are attached as a request extension.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if state.config.auth.jwt_secret.is_empty() {
        return Err(ApiError::InternalError(
            "server_not_configured",
            "JWT secret is not configured".to_string(),
        ));
    }

    let token = bearer_token(&request).ok_or_else(|| {
        ApiError::Unauthorized("missing_token", "Authorization bearer token required".to_string())
    })?;

    let claims = state
        .auth
        .authorize(token)
        .map_err(|e| ApiError::from_domain(e, "server_not_configured"))?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
