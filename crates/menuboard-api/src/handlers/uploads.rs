//! Image uploads as data URLs

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    #[serde(default)]
    pub data_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUrlResponse {
    pub image_url: String,
}

/// POST /api/uploads
pub async fn upload_image(
    State(state): State<AppState>,
    payload: Result<Json<UploadRequest>, JsonRejection>,
) -> Result<Json<ImageUrlResponse>, ApiError> {
    let request = payload.map(|Json(p)| p).unwrap_or_default();

    let image_url = state
        .images
        .upload_data_url(&request.data_url)
        .await
        .map_err(|e| ApiError::from_domain(e, "upload_failed"))?;

    Ok(Json(ImageUrlResponse { image_url }))
}
