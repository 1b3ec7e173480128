use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
};
use lab_match::Srgb;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::pick::{match_entries, ColorInfo, LabValue, MatchEntry};
use crate::error::ApiError;
use crate::services::ColorPicker;

/// Query parameters for /api/match
#[derive(Debug, Deserialize)]
pub struct MatchQuery {
    pub hex: String,
}

/// Response from /api/match
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchResponse {
    pub query: ColorInfo,
    pub matches: Vec<MatchEntry>,
}

/// One catalog entry
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogEntry {
    pub name: String,
    pub hex: String,
    pub lab: LabValue,
}

/// Response from /api/catalog
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogResponse {
    /// `embedded`, a file path or a URL
    pub source: String,
    /// Distance metric used for ranking
    pub metric: String,
    pub count: usize,
    pub entries: Vec<CatalogEntry>,
}

/// Rank the catalog against a hex color
#[utoipa::path(
    get,
    path = "/api/match",
    responses(
        (status = 200, description = "Closest markers", body = MatchResponse),
        (status = 400, description = "Missing or malformed hex color"),
        (status = 502, description = "Reference catalog could not be loaded"),
    ),
    params(
        ("hex" = String, Query, description = "Color as RRGGBB or RGB, '#' optional"),
    ),
    tag = "Catalog"
)]
pub async fn handle_match(
    State(picker): State<Arc<ColorPicker>>,
    query: Result<Query<MatchQuery>, QueryRejection>,
) -> Result<Json<MatchResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let color: Srgb = query.hex.parse()?;

    let analysis = picker.analyze(color).await?;

    Ok(Json(MatchResponse {
        query: ColorInfo::new(analysis.color, analysis.lab),
        matches: match_entries(analysis.matches),
    }))
}

/// List the loaded reference catalog
#[utoipa::path(
    get,
    path = "/api/catalog",
    responses(
        (status = 200, description = "All catalog entries in catalog order", body = CatalogResponse),
        (status = 502, description = "Reference catalog could not be loaded"),
    ),
    tag = "Catalog"
)]
pub async fn handle_catalog(
    State(picker): State<Arc<ColorPicker>>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let catalog = picker.catalog().await?;

    let entries = catalog
        .entries()
        .iter()
        .map(|e| CatalogEntry {
            name: e.name.clone(),
            hex: e.hex.clone(),
            lab: e.lab.into(),
        })
        .collect::<Vec<_>>();

    Ok(Json(CatalogResponse {
        source: picker.catalog_source(),
        metric: catalog.metric().name().to_string(),
        count: entries.len(),
        entries,
    }))
}
