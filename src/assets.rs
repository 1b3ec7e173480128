//! Asset loading with embedded fallbacks
//!
//! The page assets, the default catalog and the default config are compiled
//! into the binary. The config file can be overridden from the filesystem
//! (CONFIG_FILE env var); everything else is served from the embedded copy.
//!
//! `markerpick init` extracts the config and catalog so they can be edited and
//! pointed to with CONFIG_FILE / CATALOG_URL.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded web assets and the default catalog
#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "*.html"]
#[include = "*.js"]
#[include = "*.css"]
#[include = "*.csv"]
struct EmbeddedAssets;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// File name of the embedded reference catalog
pub const CATALOG_FILE: &str = "catalog.csv";

/// File name of the page template
pub const INDEX_TEMPLATE: &str = "index.html";

/// Asset category for selective operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Config,
    Catalog,
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with optional filesystem override for the config file
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// `config_file` should be `Some` only if the CONFIG_FILE env var was set.
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
            tracing::debug!(path = %path.display(), "Config file missing, using embedded default");
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// The embedded reference catalog (CSV)
    pub fn embedded_catalog() -> io::Result<Cow<'static, [u8]>> {
        Self::read_embedded(CATALOG_FILE)
    }

    /// The page template source
    pub fn index_template() -> io::Result<String> {
        let bytes = Self::read_embedded(INDEX_TEMPLATE)?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// A static page asset (`app.js`, `app.css`)
    ///
    /// Only script and stylesheet files are served; the template and the
    /// catalog are not reachable through this path.
    pub fn read_static(name: &str) -> Option<Cow<'static, [u8]>> {
        if !(name.ends_with(".js") || name.ends_with(".css")) || name.contains('/') {
            return None;
        }
        EmbeddedAssets::get(name).map(|f| f.data)
    }

    fn read_embedded(name: &str) -> io::Result<Cow<'static, [u8]>> {
        EmbeddedAssets::get(name).map(|f| f.data).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("Embedded asset not found: {name}"),
            )
        })
    }

    fn config_path(&self) -> PathBuf {
        self.config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("./config.yaml"))
    }

    /// The catalog is extracted next to the config file
    fn catalog_path(&self) -> PathBuf {
        self.config_path()
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .join(CATALOG_FILE)
    }

    /// Extract embedded assets to filesystem (init command)
    ///
    /// Uses the configured config path (or `./config.yaml` if not set).
    pub fn init(&self, categories: &[AssetCategory], force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        for category in categories {
            let (path, data) = match category {
                AssetCategory::Config => (
                    self.config_path(),
                    EmbeddedConfig::get("config.yaml").map(|f| f.data),
                ),
                AssetCategory::Catalog => (
                    self.catalog_path(),
                    EmbeddedAssets::get(CATALOG_FILE).map(|f| f.data),
                ),
            };

            if !force && path.exists() {
                report.skipped.push(path.display().to_string());
                continue;
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            if let Some(data) = data {
                fs::write(&path, &*data)?;
                report.written.push(path.display().to_string());
            }
        }

        Ok(report)
    }

    /// List embedded assets by category (for display)
    pub fn list_embedded(category: AssetCategory) -> Vec<String> {
        match category {
            AssetCategory::Config => vec!["config.yaml".to_string()],
            AssetCategory::Catalog => vec![CATALOG_FILE.to_string()],
        }
    }
}
