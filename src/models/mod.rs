pub mod config;
pub mod image;
pub mod viewport;

pub use config::{
    AppConfig, CatalogConfig, DisplayConfig, FetchConfig, ImagesConfig, MatchMetric,
    MatchingConfig,
};
pub use image::{ImageId, LoadedImage};
pub use viewport::{ClickError, Viewport};
