use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::ClickError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Image not found: {0}")]
    ImageNotFound(String),

    #[error("Not found")]
    NotFound,

    #[error("Invalid click: {0}")]
    InvalidClick(#[from] ClickError),

    #[error("Invalid color: {0}")]
    InvalidColor(#[from] lab_match::ParseColorError),

    #[error("Image error: {0}")]
    ImageFetch(#[from] FetchError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogLoadError),

    #[error("Preview error: {0}")]
    Preview(#[from] PreviewError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure to obtain a decoded image (or a remote catalog body)
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Upstream returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Response too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Unsupported dimensions: {width}x{height} (max {max})")]
    UnsupportedDimensions { width: u32, height: u32, max: u32 },

    #[error("Could not decode image: {0}")]
    Decode(String),
}

impl FetchError {
    /// HTTP status reported to the client when this error reaches the API
    pub fn status_code(&self) -> StatusCode {
        match self {
            FetchError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            FetchError::Decode(_) | FetchError::UnsupportedDimensions { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            FetchError::Timeout
            | FetchError::Transport(_)
            | FetchError::Status { .. }
            | FetchError::TooLarge { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// Failure to load the reference catalog
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    #[error("Invalid catalog: {0}")]
    Invalid(#[from] lab_match::CatalogError),
}

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Preview task failed: {0}")]
    Task(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::InvalidClick(_) | ApiError::InvalidColor(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ImageNotFound(_) | ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::ImageFetch(e) => e.status_code(),
            ApiError::Catalog(_) => StatusCode::BAD_GATEWAY,
            ApiError::Preview(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
