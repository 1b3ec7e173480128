//! Color types and conversion utilities
//!
//! This module provides type-safe color handling with compile-time
//! distinction between the spaces a query passes through.
//!
//! # Color Spaces
//!
//! - **Srgb**: 8-bit gamma-encoded color, as sampled from an image. Use for I/O.
//! - **LinearRgb**: Linear light intensity, the input of the XYZ matrix.
//! - **Lab**: CIE L*a*b*, the perceptual space distances are measured in.
//!
//! # Example
//!
//! ```
//! use lab_match::{Lab, LinearRgb, Srgb};
//!
//! let srgb = Srgb::new(128, 64, 32);
//! let linear = LinearRgb::from(srgb);
//! let lab = Lab::from(linear);
//! assert_eq!(lab, Lab::from(srgb));
//! ```

mod lab;
mod linear_rgb;
mod lut;
mod srgb;

pub use lab::Lab;
pub use linear_rgb::LinearRgb;
pub use srgb::Srgb;
