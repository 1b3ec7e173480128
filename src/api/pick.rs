use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use lab_match::{Lab, Srgb};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::ImageId;
use crate::services::{ColorAnalysis, ColorPicker, MarkerMatch, PickOutcome};

/// Message shown until the user clicks on the image
pub const AWAITING_CLICK_MESSAGE: &str = "Click anywhere on the photo to analyze its color";

/// Request body for /api/pick
#[derive(Debug, Deserialize, ToSchema)]
pub struct PickRequest {
    /// Id returned by POST /api/images
    pub image_id: String,
    /// Click x in preview (display) pixels
    #[serde(default)]
    pub x: Option<f64>,
    /// Click y in preview (display) pixels
    #[serde(default)]
    pub y: Option<f64>,
}

/// 8-bit sRGB channels
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct RgbValue {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<Srgb> for RgbValue {
    fn from(c: Srgb) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

/// CIE L*a*b* coordinates (D65)
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct LabValue {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl From<Lab> for LabValue {
    fn from(lab: Lab) -> Self {
        Self {
            l: lab.l,
            a: lab.a,
            b: lab.b,
        }
    }
}

/// A color in all the forms the page displays
#[derive(Debug, Serialize, ToSchema)]
pub struct ColorInfo {
    pub rgb: RgbValue,
    /// Lowercase `#rrggbb`
    pub hex: String,
    pub lab: LabValue,
}

impl ColorInfo {
    pub fn new(color: Srgb, lab: Lab) -> Self {
        Self {
            rgb: color.into(),
            hex: color.to_hex(),
            lab: lab.into(),
        }
    }
}

/// Pixel position in the original image
#[derive(Debug, Serialize, ToSchema)]
pub struct PixelPosition {
    pub x: u32,
    pub y: u32,
}

/// The sampled color of a click
#[derive(Debug, Serialize, ToSchema)]
pub struct SelectedColor {
    #[serde(flatten)]
    pub color: ColorInfo,
    /// Pixel that was sampled
    pub source: PixelPosition,
}

/// One ranked marker
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchEntry {
    /// 1 for the closest marker
    pub rank: usize,
    pub name: String,
    pub hex: String,
    /// CIEDE2000 (or configured metric) distance to the selected color
    pub distance: f64,
}

/// Convert ranked markers to their response form
pub fn match_entries(matches: Vec<MarkerMatch>) -> Vec<MatchEntry> {
    matches
        .into_iter()
        .enumerate()
        .map(|(i, m)| MatchEntry {
            rank: i + 1,
            name: m.name,
            hex: m.hex,
            distance: m.distance,
        })
        .collect()
}

/// Response from /api/pick
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PickResponse {
    /// No click yet
    AwaitingClick { image_id: String, message: String },
    /// A pixel was sampled and ranked
    Matched {
        image_id: String,
        selected: SelectedColor,
        matches: Vec<MatchEntry>,
    },
}

impl PickResponse {
    fn from_outcome(image_id: &ImageId, outcome: PickOutcome) -> Self {
        match outcome {
            PickOutcome::AwaitingClick => PickResponse::AwaitingClick {
                image_id: image_id.to_string(),
                message: AWAITING_CLICK_MESSAGE.to_string(),
            },
            PickOutcome::Matched {
                x,
                y,
                analysis:
                    ColorAnalysis {
                        color,
                        lab,
                        matches,
                    },
            } => PickResponse::Matched {
                image_id: image_id.to_string(),
                selected: SelectedColor {
                    color: ColorInfo::new(color, lab),
                    source: PixelPosition { x, y },
                },
                matches: match_entries(matches),
            },
        }
    }
}

/// Sample the clicked pixel and rank the catalog against it
///
/// Coordinates are in preview pixels. Omitting both coordinates reports
/// `awaiting_click` instead of an error, which the page uses right after an
/// image is loaded.
#[utoipa::path(
    post,
    path = "/api/pick",
    request_body = PickRequest,
    responses(
        (status = 200, description = "Awaiting a click, or the matched markers", body = PickResponse),
        (status = 400, description = "Malformed request or click outside the preview"),
        (status = 404, description = "Unknown image id"),
        (status = 502, description = "Reference catalog could not be loaded"),
    ),
    tag = "Picker"
)]
pub async fn handle_pick(
    State(picker): State<Arc<ColorPicker>>,
    payload: Result<Json<PickRequest>, JsonRejection>,
) -> Result<Json<PickResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let click = match (request.x, request.y) {
        (Some(x), Some(y)) => Some((x, y)),
        (None, None) => None,
        _ => {
            return Err(ApiError::BadRequest(
                "x and y must be given together".to_string(),
            ))
        }
    };

    let image_id = ImageId::new(request.image_id);
    let outcome = picker.pick(&image_id, click).await?;

    Ok(Json(PickResponse::from_outcome(&image_id, outcome)))
}
