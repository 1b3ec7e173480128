use image::{ImageReader, Limits, RgbImage};
use std::io::Cursor;

use super::http_fetch::HttpFetcher;
use crate::error::FetchError;

/// Downloads images and decodes them to 8-bit RGB
pub struct ImageFetcher {
    http: HttpFetcher,
    max_dimension: u32,
}

impl ImageFetcher {
    pub fn new(http: HttpFetcher, max_dimension: u32) -> Self {
        Self {
            http,
            max_dimension,
        }
    }

    /// Fetch `url` and decode it. Decoding runs on the blocking pool.
    pub async fn fetch(&self, url: &str) -> Result<RgbImage, FetchError> {
        let bytes = self.http.get_bytes(url).await?;
        let max_dimension = self.max_dimension;

        tokio::task::spawn_blocking(move || decode_image(&bytes, max_dimension))
            .await
            .map_err(|e| FetchError::Decode(format!("decode task failed: {e}")))?
    }
}

/// Decode an encoded image (PNG, JPEG, GIF, BMP, TIFF, WebP) to RGB.
///
/// The format is sniffed from the content. Alpha is discarded: a pixel's
/// color is its RGB channels regardless of transparency. Images wider or
/// taller than `max_dimension` are rejected before the pixel data is decoded.
pub fn decode_image(bytes: &[u8], max_dimension: u32) -> Result<RgbImage, FetchError> {
    let (width, height) = reader(bytes)?
        .into_dimensions()
        .map_err(|e| FetchError::Decode(e.to_string()))?;

    if width == 0 || height == 0 || width > max_dimension || height > max_dimension {
        return Err(FetchError::UnsupportedDimensions {
            width,
            height,
            max: max_dimension,
        });
    }

    let mut reader = reader(bytes)?;
    let mut limits = Limits::default();
    limits.max_image_width = Some(max_dimension);
    limits.max_image_height = Some(max_dimension);
    reader.limits(limits);

    let decoded = reader
        .decode()
        .map_err(|e| FetchError::Decode(e.to_string()))?;

    tracing::debug!(width, height, color = ?decoded.color(), "Decoded image");
    Ok(decoded.to_rgb8())
}

fn reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, FetchError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| FetchError::Decode(format!("failed to detect image format: {e}")))
}
