// ============================================================================
// Menu Board API - Menu Handlers
// File: crates/menuboard-api/src/handlers/menu.rs
// ============================================================================
//! Read and publish the menu document

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/menu - 204 until something has been published
pub async fn get_menu(State(state): State<AppState>) -> Result<Response, ApiError> {
    match state.menu.current().await {
        Ok(Some(document)) => Ok(Json(document).into_response()),
        Ok(None) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(e) => Err(ApiError::from_domain(e, "read_failed")),
    }
}

/// POST|PUT /api/menu - replace the whole document
pub async fn publish_menu(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload
        .map_err(|e| ApiError::BadRequest("invalid_payload", e.body_text()))?;

    let saved = state
        .menu
        .publish(payload)
        .await
        .map_err(|e| ApiError::from_domain(e, "write_failed"))?;

    Ok(Json(saved).into_response())
}
