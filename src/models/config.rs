use crate::assets::AssetLoader;
use lab_match::DeltaE;
use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Where the reference catalog comes from
    pub catalog: CatalogConfig,

    /// Outbound HTTP settings for image and catalog downloads
    pub fetch: FetchConfig,

    /// Preview sizing
    pub display: DisplayConfig,

    /// Ranking settings
    pub matching: MatchingConfig,

    /// Decoded image store
    pub images: ImagesConfig,
}

/// Catalog source configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CatalogConfig {
    /// `embedded`, a file path, or an http(s) URL
    pub source: String,

    /// Load the catalog at startup rather than on first use
    pub preload: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: "embedded".to_string(),
            preload: true,
        }
    }
}

/// Outbound fetch configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    /// Largest image body accepted, in bytes
    pub max_image_bytes: usize,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_image_bytes: 20 * 1024 * 1024,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("markerpick/{}", env!("CARGO_PKG_VERSION"))
}

impl FetchConfig {
    /// Request timeout, at least one second
    pub fn timeout(&self) -> Duration {
        if self.timeout_secs == 0 {
            tracing::warn!("fetch.timeout_secs is 0, using 1 second");
        }
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Preview sizing configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_width: 800,
            max_height: 650,
        }
    }
}

/// Ranking configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MatchingConfig {
    /// Number of catalog entries reported per click
    pub count: usize,

    /// Color-difference formula
    pub metric: MatchMetric,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            count: lab_match::DEFAULT_MATCH_COUNT,
            metric: MatchMetric::default(),
        }
    }
}

/// Color-difference formula selectable from config
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchMetric {
    #[default]
    Ciede2000,
    Cie76,
}

impl From<MatchMetric> for DeltaE {
    fn from(metric: MatchMetric) -> Self {
        match metric {
            MatchMetric::Ciede2000 => DeltaE::default(),
            MatchMetric::Cie76 => DeltaE::Cie76,
        }
    }
}

/// Decoded image store configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ImagesConfig {
    /// Images kept in memory; the least recently used is evicted first
    pub max_cached: usize,

    /// Largest accepted width or height of a decoded image
    pub max_dimension: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            max_cached: 16,
            max_dimension: 16_384,
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        catalog = %config.catalog.source,
                        match_count = config.matching.count,
                        metric = ?config.matching.metric,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Replace the catalog source (used for the CATALOG_URL env var)
    pub fn with_catalog_source(mut self, source: Option<String>) -> Self {
        if let Some(source) = source.filter(|s| !s.trim().is_empty()) {
            tracing::info!(catalog = %source, "Catalog source overridden");
            self.catalog.source = source;
        }
        self
    }
}
