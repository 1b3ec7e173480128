use serde::Serialize;
use utoipa::ToSchema;

/// Maps between an image's original pixel grid and the smaller grid it is
/// displayed at in the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Viewport {
    /// Original image width in pixels
    pub width: u32,
    /// Original image height in pixels
    pub height: u32,
    /// Width of the preview shown to the user
    pub display_width: u32,
    /// Height of the preview shown to the user
    pub display_height: u32,
}

/// Why a click could not be mapped onto the image
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ClickError {
    #[error("click coordinates must be finite numbers")]
    NotFinite,

    #[error("click ({x}, {y}) is outside the {width}x{height} preview")]
    OutOfBounds {
        x: f64,
        y: f64,
        width: u32,
        height: u32,
    },
}

impl Viewport {
    /// Fit `width`×`height` inside `max_width`×`max_height`.
    ///
    /// Height is constrained first, then width, each scaling the other side
    /// by the aspect ratio with truncation. Images already within bounds keep
    /// their size; no side is ever reduced below one pixel.
    pub fn fit(width: u32, height: u32, max_width: u32, max_height: u32) -> Self {
        let max_width = max_width.max(1);
        let max_height = max_height.max(1);
        let mut display_width = width.max(1);
        let mut display_height = height.max(1);

        if display_height > max_height {
            let ratio = display_width as f64 / display_height as f64;
            display_height = max_height;
            display_width = ((max_height as f64 * ratio) as u32).max(1);
        }

        if display_width > max_width {
            let ratio = display_height as f64 / display_width as f64;
            display_width = max_width;
            display_height = ((max_width as f64 * ratio) as u32).max(1);
        }

        Self {
            width,
            height,
            display_width,
            display_height,
        }
    }

    /// Whether the preview is smaller than the original
    pub fn is_scaled(&self) -> bool {
        self.width != self.display_width || self.height != self.display_height
    }

    /// Map a click in display space onto a pixel of the original image.
    ///
    /// Coordinates may be fractional (browsers report sub-pixel offsets).
    /// A click on the far edge (`x == display_width`) is accepted and lands
    /// on the last column.
    pub fn to_source(&self, x: f64, y: f64) -> Result<(u32, u32), ClickError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ClickError::NotFinite);
        }
        if x < 0.0
            || y < 0.0
            || x > self.display_width as f64
            || y > self.display_height as f64
        {
            return Err(ClickError::OutOfBounds {
                x,
                y,
                width: self.display_width,
                height: self.display_height,
            });
        }

        let sx = scale_axis(x, self.width, self.display_width);
        let sy = scale_axis(y, self.height, self.display_height);
        Ok((sx, sy))
    }
}

fn scale_axis(pos: f64, source: u32, display: u32) -> u32 {
    let scaled = (pos * source as f64 / display as f64).floor() as u32;
    scaled.min(source.saturating_sub(1))
}
