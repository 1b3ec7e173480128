#![allow(clippy::excessive_precision, clippy::module_inception)]

//! lab-match: perceptual nearest-color matching against named catalogs
//!
//! This library converts 8-bit sRGB colors to CIE L\*a\*b\* and ranks a
//! catalog of named reference colors (marker sets, paint ranges, thread
//! charts) by perceptual color difference.
//!
//! # Quick Start
//!
//! ```
//! use lab_match::{Catalog, Srgb, DEFAULT_MATCH_COUNT};
//!
//! let catalog = Catalog::from_hex([
//!     ("R29 Lipstick Red", "#ea3c44"),
//!     ("B29 Ultramarine", "#0085c8"),
//!     ("Y08 Acid Yellow", "#fff100"),
//! ])
//! .unwrap();
//!
//! let matches = catalog.nearest_srgb(Srgb::new(255, 0, 0), DEFAULT_MATCH_COUNT);
//! assert_eq!(matches.len(), 3);
//! assert_eq!(matches[0].entry.name, "R29 Lipstick Red");
//! ```
//!
//! # Color Spaces
//!
//! - [`Srgb`]: 8-bit gamma-encoded input, as sampled from an image
//! - [`LinearRgb`]: linear light, the input of the XYZ transform
//! - [`Lab`]: CIE L\*a\*b\* (D65), the space distances are measured in
//!
//! ## Pipeline
//!
//! ```text
//! Srgb (u8 x3)            (clicked pixel / catalog hex)
//!     |
//!     v
//! LinearRgb               (gamma decode via 256-entry LUT)
//!     |
//!     v
//! XYZ (D65)               (sRGB primaries matrix)
//!     |
//!     v
//! Lab                     (cube-root compression, white-normalized)
//!     |
//!     v
//! DeltaE::distance()      (CIEDE2000 against every catalog entry)
//!     |
//!     v
//! stable sort, truncate   (nearest first)
//! ```
//!
//! # Distance Metric
//!
//! Euclidean distance in Lab (CIE76) overstates differences between
//! saturated colors and understates them in the blue region. CIEDE2000
//! corrects both with lightness, chroma and hue weighting functions plus a
//! rotation term for blues, which makes it the default for ranking. See
//! [`DeltaE`] for both formulas.
//!
//! Both metrics are symmetric and return exactly 0.0 for identical inputs,
//! so querying the coordinates of a catalog entry always ranks that entry
//! first.

pub mod catalog;
pub mod color;
pub mod delta_e;


pub use catalog::{
    Catalog, CatalogError, ColorMatch, ParseColorError, ReferenceColor, DEFAULT_MATCH_COUNT,
};
pub use color::{Lab, LinearRgb, Srgb};
pub use delta_e::DeltaE;
