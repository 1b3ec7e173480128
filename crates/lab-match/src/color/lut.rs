//! Gamma lookup table access
//!
//! The table is generated at compile time by build.rs from the exact
//! IEC 61966-2-1 formula, so lookups are bit-identical to evaluating it.

// Include the generated LUT from build.rs
include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Decode an 8-bit sRGB channel value to linear light.
#[inline]
pub fn srgb8_to_linear(value: u8) -> f64 {
    SRGB8_TO_LINEAR[value as usize]
}
