//! Reference catalogs and nearest-color ranking
//!
//! A [`Catalog`] is an immutable list of named reference colors with
//! precomputed Lab coordinates. [`Catalog::nearest()`] ranks it against a
//! query color.

mod catalog;
mod error;

pub use catalog::{Catalog, ColorMatch, ReferenceColor, DEFAULT_MATCH_COUNT};
pub use error::{CatalogError, ParseColorError};
