use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::services::PageRenderer;

/// Query parameters for the page
#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    /// Prefill (and auto-load) this image URL
    #[serde(default)]
    pub url: Option<String>,
}

/// The picker page
pub async fn handle_index(
    State(pages): State<Arc<PageRenderer>>,
    Query(query): Query<IndexQuery>,
) -> Result<Html<String>, ApiError> {
    let html = pages
        .render_index(query.url.as_deref())
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Html(html))
}

/// Embedded script and stylesheet
pub async fn handle_static(Path(file): Path<String>) -> Result<Response, ApiError> {
    let data = AssetLoader::read_static(&file).ok_or(ApiError::NotFound)?;

    let content_type = if file.ends_with(".css") {
        "text/css; charset=utf-8"
    } else {
        "text/javascript; charset=utf-8"
    };

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        data.into_owned(),
    )
        .into_response())
}
