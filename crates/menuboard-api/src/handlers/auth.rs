//! Admin login

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    // An unreadable body is just a wrong password.
    let request = payload.map(|Json(p)| p).unwrap_or_default();

    let token = state
        .auth
        .login(&request.password)
        .map_err(|e| ApiError::from_domain(e, "server_not_configured"))?;

    Ok(Json(LoginResponse { token }))
}
