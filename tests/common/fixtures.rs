//! Test fixtures and constants.

use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// Expected top-5 for pure colors against the embedded catalog
pub mod expected {
    pub const RED_TOP5: [&str; 5] = [
        "R27 Cadmium Red",
        "R29 Lipstick Red",
        "YR07 Cadmium Orange",
        "E09 Burnt Sienna",
        "R59 Cardinal",
    ];

    pub const BLUE_TOP5: [&str; 5] = [
        "B39 Prussian Blue",
        "V09 Violet",
        "B29 Ultramarine",
        "BV08 Blue Violet",
        "N7 Neutral Gray No.7",
    ];

    pub const PROCESS_BLUE_TOP5: [&str; 5] = [
        "B05 Process Blue",
        "B29 Ultramarine",
        "C5 Cool Gray No.5",
        "N7 Neutral Gray No.7",
        "B39 Prussian Blue",
    ];
}

/// Encode an image as PNG bytes
pub fn png_bytes(img: &RgbImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("Failed to encode PNG");
    out.into_inner()
}

/// Encode an image as JPEG bytes
pub fn jpeg_bytes(img: &RgbImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Jpeg)
        .expect("Failed to encode JPEG");
    out.into_inner()
}

/// Image whose left half is pure red and right half pure blue
pub fn red_blue_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        }
    })
}

/// Single-color image
pub fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(rgb))
}

/// Small catalog used for custom-source tests
pub const PRIMARY_CATALOG_CSV: &str = "name,hex\nRed,#ff0000\nGreen,#00ff00\nBlue,#0000ff\n";

/// Same as [`PRIMARY_CATALOG_CSV`] as JSON, with precomputed Lab for Red
pub const PRIMARY_CATALOG_JSON: &str = r##"[
  {"marker_name": "Red", "hex": "#ff0000", "lab": [53.2406, 80.0923, 67.2028]},
  {"marker_name": "Green", "hex": "#00ff00"},
  {"marker_name": "Blue", "hex": "#0000ff"}
]"##;
