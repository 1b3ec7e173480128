//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header::CACHE_CONTROL, HeaderValue},
    response::{Html, Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{
    CatalogLoader, CatalogSource, ColorPicker, HttpFetcher, ImageFetcher, InMemoryImageStore,
    PageRenderer,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub picker: Arc<ColorPicker>,
    pub pages: Arc<PageRenderer>,
}

/// Create application state from a loaded configuration.
pub fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let http = HttpFetcher::new(&config.fetch)
        .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {e}"))?;

    let catalog = Arc::new(CatalogLoader::new(
        CatalogSource::parse(&config.catalog.source),
        config.matching.metric.into(),
        http.clone(),
    ));
    let images = Arc::new(InMemoryImageStore::new(config.images.max_cached));
    let picker = Arc::new(ColorPicker::new(
        catalog,
        ImageFetcher::new(http, config.images.max_dimension),
        images,
        config.display.clone(),
        config.matching.count,
    ));
    let pages = Arc::new(
        PageRenderer::new(&config)
            .map_err(|e| anyhow::anyhow!("Failed to compile page template: {e}"))?,
    );

    Ok(AppState {
        config: Arc::new(config),
        picker,
        pages,
    })
}

impl AppState {
    /// Load the catalog now when configured to, so the first click is fast.
    ///
    /// A failure only warns; the next request retries the load.
    pub async fn preload_catalog(&self) {
        if !self.config.catalog.preload {
            return;
        }
        if let Err(e) = self.picker.catalog().await {
            tracing::warn!(error = %e, "Catalog preload failed, will retry on first request");
        }
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
/// Responses default to `Cache-Control: no-store`; handlers that serve
/// cacheable content set their own value.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Page
        .route("/", get(handle_index))
        .route("/static/:file", get(api::handle_static))
        // Picker API
        .route("/api/images", post(handle_load_image))
        .route("/api/images/:id/preview", get(handle_preview))
        .route("/api/pick", post(handle_pick))
        .route("/api/match", get(handle_match))
        .route("/api/catalog", get(handle_catalog))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_index(
    State(state): State<AppState>,
    query: Query<api::page::IndexQuery>,
) -> Result<Html<String>, ApiError> {
    api::handle_index(State(state.pages), query).await
}

async fn handle_load_image(
    State(state): State<AppState>,
    payload: Result<Json<api::LoadImageRequest>, JsonRejection>,
) -> Result<Json<api::LoadImageResponse>, ApiError> {
    api::handle_load_image(State(state.picker), payload).await
}

async fn handle_preview(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<Response, ApiError> {
    api::handle_preview(State(state.picker), path).await
}

async fn handle_pick(
    State(state): State<AppState>,
    payload: Result<Json<api::PickRequest>, JsonRejection>,
) -> Result<Json<api::PickResponse>, ApiError> {
    api::handle_pick(State(state.picker), payload).await
}

async fn handle_match(
    State(state): State<AppState>,
    query: Result<Query<api::catalog::MatchQuery>, QueryRejection>,
) -> Result<Json<api::MatchResponse>, ApiError> {
    api::handle_match(State(state.picker), query).await
}

async fn handle_catalog(
    State(state): State<AppState>,
) -> Result<Json<api::CatalogResponse>, ApiError> {
    api::handle_catalog(State(state.picker)).await
}
