//! Reference catalog loading.
//!
//! The catalog is read once per loader and shared as `Arc<Catalog>`. A failed
//! load is not cached; the next request tries again.
//!
//! Parquet files are recognised by their `PAR1` magic (see
//! [`catalog_parquet`](super::catalog_parquet)). Text catalogs come in two
//! formats, told apart by their first non-blank byte:
//!
//! ```text
//! name,hex,l,a,b                         CSV, header required; l/a/b optional
//! R29 Lipstick Red,#ea3c44,53.8,65.4,36.1
//!
//! [{"name": "R29 Lipstick Red",          JSON array; "lab" optional
//!   "hex": "#ea3c44",
//!   "lab": [53.8, 65.4, 36.1]}]
//! ```
//!
//! `marker_name` is accepted in place of `name`. Rows without Lab
//! coordinates get them derived from the hex value.

use lab_match::{Catalog, DeltaE, Lab, ReferenceColor, Srgb};
use serde::Deserialize;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::catalog_parquet::{is_parquet, parse_parquet};
use super::http_fetch::HttpFetcher;
use crate::assets::AssetLoader;
use crate::error::CatalogLoadError;

/// Where catalog data is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// The catalog compiled into the binary
    Embedded,
    /// An http(s) URL
    Url(String),
    /// A local file
    File(PathBuf),
}

impl CatalogSource {
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        if source.is_empty() || source.eq_ignore_ascii_case("embedded") {
            CatalogSource::Embedded
        } else if source.starts_with("http://") || source.starts_with("https://") {
            CatalogSource::Url(source.to_string())
        } else {
            CatalogSource::File(PathBuf::from(source))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Embedded => write!(f, "embedded"),
            CatalogSource::Url(url) => write!(f, "{url}"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Loads the reference catalog on first use and caches it
pub struct CatalogLoader {
    source: CatalogSource,
    metric: DeltaE,
    http: HttpFetcher,
    catalog: OnceCell<Arc<Catalog>>,
}

impl CatalogLoader {
    pub fn new(source: CatalogSource, metric: DeltaE, http: HttpFetcher) -> Self {
        Self {
            source,
            metric,
            http,
            catalog: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// The loaded catalog, loading it if this is the first call
    pub async fn get(&self) -> Result<Arc<Catalog>, CatalogLoadError> {
        self.catalog
            .get_or_try_init(|| self.load())
            .await
            .cloned()
    }

    async fn load(&self) -> Result<Arc<Catalog>, CatalogLoadError> {
        let bytes = match &self.source {
            CatalogSource::Embedded => AssetLoader::embedded_catalog()
                .map_err(|source| CatalogLoadError::Io {
                    path: "embedded".to_string(),
                    source,
                })?
                .into_owned(),
            CatalogSource::Url(url) => self.http.get_bytes(url).await?,
            CatalogSource::File(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| CatalogLoadError::Io {
                        path: path.display().to_string(),
                        source,
                    })?
            }
        };

        let catalog = parse_catalog(&bytes)
            .and_then(|entries| Ok(Catalog::new(entries)?.with_metric(self.metric)));

        match catalog {
            Ok(catalog) => {
                tracing::info!(
                    source = %self.source,
                    entries = catalog.len(),
                    metric = catalog.metric().name(),
                    "Loaded reference catalog"
                );
                Ok(Arc::new(catalog))
            }
            Err(e) => {
                tracing::error!(source = %self.source, error = %e, "Failed to load reference catalog");
                Err(e)
            }
        }
    }
}

#[derive(Deserialize)]
struct CsvRow {
    #[serde(alias = "marker_name")]
    name: String,
    hex: String,
    #[serde(default)]
    l: Option<f64>,
    #[serde(default)]
    a: Option<f64>,
    #[serde(default)]
    b: Option<f64>,
}

#[derive(Deserialize)]
struct JsonEntry {
    #[serde(alias = "marker_name")]
    name: String,
    hex: String,
    #[serde(default)]
    lab: Option<[f64; 3]>,
}

/// Parse catalog data in any supported format
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<ReferenceColor>, CatalogLoadError> {
    if is_parquet(bytes) {
        return parse_parquet(bytes);
    }

    let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let first = body.iter().find(|b| !b.is_ascii_whitespace());

    if first == Some(&b'[') {
        parse_json(body)
    } else {
        parse_csv(body)
    }
}

fn parse_csv(body: &[u8]) -> Result<Vec<ReferenceColor>, CatalogLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(body);

    let mut entries = Vec::new();
    for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        let lab = match (row.l, row.a, row.b) {
            (Some(l), Some(a), Some(b)) => Some(Lab::new(l, a, b)),
            (None, None, None) => None,
            _ => {
                return Err(CatalogLoadError::InvalidRow {
                    row: index + 1,
                    message: "l, a and b must be given together".to_string(),
                })
            }
        };
        entries.push(entry(index + 1, row.name, &row.hex, lab)?);
    }
    Ok(entries)
}

fn parse_json(body: &[u8]) -> Result<Vec<ReferenceColor>, CatalogLoadError> {
    let rows: Vec<JsonEntry> = serde_json::from_slice(body)?;
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| entry(index + 1, row.name, &row.hex, row.lab.map(Lab::from)))
        .collect()
}

pub(super) fn entry(
    row: usize,
    name: String,
    hex: &str,
    lab: Option<Lab>,
) -> Result<ReferenceColor, CatalogLoadError> {
    if name.trim().is_empty() {
        return Err(CatalogLoadError::InvalidRow {
            row,
            message: "name is empty".to_string(),
        });
    }

    let srgb: Srgb = hex.parse().map_err(|e| CatalogLoadError::InvalidRow {
        row,
        message: format!("invalid hex '{hex}': {e}"),
    })?;

    Ok(ReferenceColor::new(
        name.trim(),
        srgb.to_hex(),
        lab.unwrap_or_else(|| Lab::from(srgb)),
    ))
}

/// Write entries as CSV with precomputed Lab columns
pub fn write_catalog_csv<W: io::Write>(
    entries: &[ReferenceColor],
    writer: W,
) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["name", "hex", "l", "a", "b"])?;
    for entry in entries {
        out.write_record([
            entry.name.clone(),
            entry.hex.clone(),
            format!("{:.4}", entry.lab.l),
            format!("{:.4}", entry.lab.a),
            format!("{:.4}", entry.lab.b),
        ])?;
    }
    out.flush()?;
    Ok(())
}
