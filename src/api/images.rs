use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::ImageId;
use crate::services::ColorPicker;

/// Request body for /api/images
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoadImageRequest {
    /// http(s) URL of the image
    pub url: String,
}

/// Response from /api/images
#[derive(Debug, Serialize, ToSchema)]
pub struct LoadImageResponse {
    /// Id to pass to /api/pick
    pub image_id: String,
    pub url: String,
    /// Original width in pixels
    pub width: u32,
    /// Original height in pixels
    pub height: u32,
    /// Width the preview is shown at
    pub display_width: u32,
    /// Height the preview is shown at
    pub display_height: u32,
    /// Where to fetch the preview PNG
    pub preview_url: String,
    /// When the image was fetched (RFC 3339)
    #[schema(value_type = String, format = DateTime)]
    pub loaded_at: DateTime<Utc>,
}

/// Fetch and decode an image
///
/// The image is kept in memory so later clicks can be sampled. Loading the
/// same URL again replaces the stored copy.
#[utoipa::path(
    post,
    path = "/api/images",
    request_body = LoadImageRequest,
    responses(
        (status = 200, description = "Image loaded", body = LoadImageResponse),
        (status = 400, description = "Invalid URL"),
        (status = 422, description = "Content is not a decodable image"),
        (status = 502, description = "Image could not be fetched"),
    ),
    tag = "Images"
)]
pub async fn handle_load_image(
    State(picker): State<Arc<ColorPicker>>,
    payload: Result<Json<LoadImageRequest>, JsonRejection>,
) -> Result<Json<LoadImageResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let image = picker.load_image(&request.url).await?;
    let viewport = image.viewport;

    Ok(Json(LoadImageResponse {
        image_id: image.id.to_string(),
        url: image.url.clone(),
        width: viewport.width,
        height: viewport.height,
        display_width: viewport.display_width,
        display_height: viewport.display_height,
        preview_url: format!("/api/images/{}/preview", image.id),
        loaded_at: image.loaded_at,
    }))
}

/// Get the preview PNG of a loaded image
#[utoipa::path(
    get,
    path = "/api/images/{id}/preview",
    responses(
        (status = 200, description = "PNG at display size", content_type = "image/png"),
        (status = 404, description = "Unknown image id"),
    ),
    params(
        ("id" = String, Path, description = "Image id from POST /api/images"),
    ),
    tag = "Images"
)]
pub async fn handle_preview(
    State(picker): State<Arc<ColorPicker>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let png = picker.preview(&ImageId::new(id)).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "private, max-age=300"),
        ],
        png,
    )
        .into_response())
}
