use image::imageops::{self, FilterType};
use image::RgbImage;
use std::io::Cursor;

use crate::error::PreviewError;
use crate::models::Viewport;

/// Downscale an image to its display size and encode it as PNG.
///
/// Images already at display size are encoded as they are.
pub fn render_preview(pixels: &RgbImage, viewport: Viewport) -> Result<Vec<u8>, PreviewError> {
    if viewport.is_scaled() {
        let resized = imageops::resize(
            pixels,
            viewport.display_width,
            viewport.display_height,
            FilterType::CatmullRom,
        );
        encode_png(&resized)
    } else {
        encode_png(pixels)
    }
}

/// Encode 8-bit RGB pixels as a PNG.
fn encode_png(pixels: &RgbImage) -> Result<Vec<u8>, PreviewError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, pixels.width(), pixels.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| PreviewError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(pixels.as_raw())
            .map_err(|e| PreviewError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
