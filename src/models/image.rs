use image::RgbImage;
use lab_match::Srgb;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use super::viewport::Viewport;

/// Identifier of a loaded image: first 16 bytes of SHA-256 over the URL, hex encoded
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    pub fn from_url(url: &str) -> Self {
        let digest = Sha256::digest(url.as_bytes());
        Self(hex::encode(&digest[..16]))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fetched and decoded image, ready to be sampled
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub id: ImageId,
    pub url: String,
    pub pixels: RgbImage,
    pub viewport: Viewport,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

impl LoadedImage {
    pub fn new(url: impl Into<String>, pixels: RgbImage, max_width: u32, max_height: u32) -> Self {
        let url = url.into();
        let viewport = Viewport::fit(pixels.width(), pixels.height(), max_width, max_height);
        Self {
            id: ImageId::from_url(&url),
            url,
            pixels,
            viewport,
            loaded_at: chrono::Utc::now(),
        }
    }

    /// Color of a pixel in original-image coordinates, or `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<Srgb> {
        self.pixels
            .get_pixel_checked(x, y)
            .map(|p| Srgb::from_bytes(p.0))
    }
}
