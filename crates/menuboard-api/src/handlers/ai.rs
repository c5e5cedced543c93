//! AI-assisted dish content

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use menuboard_core::services::DishPrompt;
use menuboard_shared::utils::request_id;

use crate::error::ApiError;
use crate::handlers::uploads::ImageUrlResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DishContentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl From<DishContentRequest> for DishPrompt {
    fn from(request: DishContentRequest) -> Self {
        DishPrompt {
            name: request.name,
            description: request.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DescriptionResponse {
    pub description: String,
}

/// POST /api/ai/image
pub async fn generate_image(
    State(state): State<AppState>,
    payload: Result<Json<DishContentRequest>, JsonRejection>,
) -> Result<Json<ImageUrlResponse>, ApiError> {
    let request_id = request_id();
    let dish: DishPrompt = payload.map(|Json(p)| p).unwrap_or_default().into();

    let image_url = state
        .content
        .generate_image(&request_id, &dish)
        .await
        .map_err(|e| ApiError::from_domain(e, "ai_failed"))?;

    Ok(Json(ImageUrlResponse { image_url }))
}

/// POST /api/ai/description
pub async fn improve_description(
    State(state): State<AppState>,
    payload: Result<Json<DishContentRequest>, JsonRejection>,
) -> Result<Json<DescriptionResponse>, ApiError> {
    let request_id = request_id();
    let dish: DishPrompt = payload.map(|Json(p)| p).unwrap_or_default().into();

    let description = state
        .content
        .improve_description(&request_id, &dish)
        .await
        .map_err(|e| ApiError::from_domain(e, "ai_failed"))?;

    Ok(Json(DescriptionResponse { description }))
}
