//! Catalog of named reference colors with nearest-color ranking.
//!
//! The catalog is built once, then only read. Ranking is a linear scan:
//! catalogs hold tens to a few hundred entries, so there is nothing to gain
//! from a spatial index.

use std::str::FromStr;

use super::error::CatalogError;
use crate::color::{Lab, Srgb};
use crate::delta_e::DeltaE;

/// Number of matches returned when callers do not ask for a specific count.
pub const DEFAULT_MATCH_COUNT: usize = 5;

/// A named reference color.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceColor {
    /// Human-readable identifier, e.g. `"R29 Lipstick Red"`
    pub name: String,
    /// Display form, lowercase `#rrggbb`
    pub hex: String,
    /// Precomputed perceptual coordinates
    pub lab: Lab,
}

impl ReferenceColor {
    /// Create an entry with precomputed Lab coordinates.
    ///
    /// The hex string is stored as given; use [`ReferenceColor::from_hex()`]
    /// to normalize it.
    pub fn new(name: impl Into<String>, hex: impl Into<String>, lab: Lab) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
            lab,
        }
    }

    /// Create an entry from a hex string, deriving the Lab coordinates.
    ///
    /// ```
    /// use lab_match::ReferenceColor;
    ///
    /// let entry = ReferenceColor::from_hex("Red", "F00").unwrap();
    /// assert_eq!(entry.hex, "#ff0000");
    /// assert!((entry.lab.l - 53.24).abs() < 0.01);
    /// ```
    pub fn from_hex(
        name: impl Into<String>,
        hex: &str,
    ) -> Result<Self, crate::catalog::ParseColorError> {
        let srgb = Srgb::from_str(hex)?;
        Ok(Self {
            name: name.into(),
            hex: srgb.to_hex(),
            lab: Lab::from(srgb),
        })
    }
}

/// One ranked result of [`Catalog::nearest()`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatch<'a> {
    /// The matched catalog entry
    pub entry: &'a ReferenceColor,
    /// Perceptual distance from the query under the catalog's metric
    pub distance: f64,
}

/// An immutable, non-empty catalog of reference colors.
///
/// # Example
///
/// ```
/// use lab_match::{Catalog, Lab, ReferenceColor, Srgb};
///
/// let catalog = Catalog::new(vec![
///     ReferenceColor::from_hex("Red", "#ff0000").unwrap(),
///     ReferenceColor::from_hex("Blue", "#0000ff").unwrap(),
/// ])
/// .unwrap();
///
/// let matches = catalog.nearest(Lab::from(Srgb::new(250, 10, 10)), 5);
/// assert_eq!(matches.len(), 2);
/// assert_eq!(matches[0].entry.name, "Red");
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<ReferenceColor>,
    metric: DeltaE,
}

impl Catalog {
    /// Build a catalog ranked with the default metric (CIEDE2000).
    ///
    /// # Errors
    ///
    /// - [`CatalogError::EmptyCatalog`] if `entries` is empty
    /// - [`CatalogError::NonFiniteCoordinates`] if any Lab component is NaN or infinite
    pub fn new(entries: Vec<ReferenceColor>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        if let Some(index) = entries.iter().position(|e| !e.lab.is_finite()) {
            return Err(CatalogError::NonFiniteCoordinates { index });
        }

        Ok(Self {
            entries,
            metric: DeltaE::default(),
        })
    }

    /// Build a catalog from `(name, hex)` pairs, deriving Lab coordinates.
    ///
    /// # Errors
    ///
    /// [`CatalogError::InvalidHex`] for the first unparsable hex string, or
    /// any error of [`Catalog::new()`].
    pub fn from_hex<N, H>(pairs: impl IntoIterator<Item = (N, H)>) -> Result<Self, CatalogError>
    where
        N: Into<String>,
        H: AsRef<str>,
    {
        let entries = pairs
            .into_iter()
            .enumerate()
            .map(|(index, (name, hex))| {
                ReferenceColor::from_hex(name, hex.as_ref())
                    .map_err(|source| CatalogError::InvalidHex { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    /// Override the distance metric used for ranking.
    pub fn with_metric(mut self, metric: DeltaE) -> Self {
        self.metric = metric;
        self
    }

    /// The distance metric used for ranking.
    #[inline]
    pub fn metric(&self) -> DeltaE {
        self.metric
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: empty catalogs are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order.
    #[inline]
    pub fn entries(&self) -> &[ReferenceColor] {
        &self.entries
    }

    /// Rank the catalog against `query` and return the `count` closest
    /// entries, nearest first.
    ///
    /// Returns fewer than `count` results when the catalog is smaller.
    /// Entries at exactly equal distance keep their catalog order.
    pub fn nearest(&self, query: Lab, count: usize) -> Vec<ColorMatch<'_>> {
        let mut ranked: Vec<ColorMatch<'_>> = self
            .entries
            .iter()
            .map(|entry| ColorMatch {
                entry,
                distance: self.metric.distance(query, entry.lab),
            })
            .collect();

        // sort_by is stable, which gives the insertion-order tie-break
        ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        ranked.truncate(count);
        ranked
    }

    /// Convenience wrapper: rank against an 8-bit sRGB color.
    pub fn nearest_srgb(&self, color: Srgb, count: usize) -> Vec<ColorMatch<'_>> {
        self.nearest(Lab::from(color), count)
    }
}
