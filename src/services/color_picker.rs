use lab_match::{Catalog, Lab, Srgb};
use std::sync::Arc;

use super::catalog_loader::CatalogLoader;
use super::image_fetcher::ImageFetcher;
use super::image_store::ImageStore;
use crate::error::{ApiError, CatalogLoadError, PreviewError};
use crate::models::{DisplayConfig, ImageId, LoadedImage};
use crate::rendering::render_preview;

/// One ranked catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerMatch {
    pub name: String,
    pub hex: String,
    pub distance: f64,
}

/// A color together with its perceptual coordinates and closest markers
#[derive(Debug, Clone, PartialEq)]
pub struct ColorAnalysis {
    pub color: Srgb,
    pub lab: Lab,
    pub matches: Vec<MarkerMatch>,
}

/// Result of a pick request
#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    /// No click has been made on the image yet
    AwaitingClick,
    /// A pixel was sampled and ranked
    Matched {
        /// Sampled pixel in original-image coordinates
        x: u32,
        y: u32,
        analysis: ColorAnalysis,
    },
}

/// Ties together image loading, pixel sampling and catalog ranking
pub struct ColorPicker {
    catalog: Arc<CatalogLoader>,
    fetcher: ImageFetcher,
    images: Arc<dyn ImageStore>,
    display: DisplayConfig,
    match_count: usize,
}

impl ColorPicker {
    pub fn new(
        catalog: Arc<CatalogLoader>,
        fetcher: ImageFetcher,
        images: Arc<dyn ImageStore>,
        display: DisplayConfig,
        match_count: usize,
    ) -> Self {
        Self {
            catalog,
            fetcher,
            images,
            display,
            match_count,
        }
    }

    /// The reference catalog, loaded on first use
    pub async fn catalog(&self) -> Result<Arc<Catalog>, CatalogLoadError> {
        self.catalog.get().await
    }

    /// Label of the configured catalog source
    pub fn catalog_source(&self) -> String {
        self.catalog.source().to_string()
    }

    /// Fetch and decode an image, then keep it for later picks
    pub async fn load_image(&self, url: &str) -> Result<Arc<LoadedImage>, ApiError> {
        let url = url.trim();
        let pixels = self.fetcher.fetch(url).await?;
        let image = Arc::new(LoadedImage::new(
            url,
            pixels,
            self.display.max_width,
            self.display.max_height,
        ));

        tracing::info!(
            image_id = %image.id,
            url = %image.url,
            width = image.viewport.width,
            height = image.viewport.height,
            display_width = image.viewport.display_width,
            display_height = image.viewport.display_height,
            "Loaded image"
        );

        self.images.insert(image.clone()).await;
        let cached = self.images.len().await;
        tracing::debug!(cached, "Image store size");
        Ok(image)
    }

    /// Look up a previously loaded image
    pub async fn image(&self, id: &ImageId) -> Result<Arc<LoadedImage>, ApiError> {
        self.images
            .get(id)
            .await
            .ok_or_else(|| ApiError::ImageNotFound(id.to_string()))
    }

    /// PNG preview of a loaded image at its display size
    pub async fn preview(&self, id: &ImageId) -> Result<Vec<u8>, ApiError> {
        let image = self.image(id).await?;

        let png = tokio::task::spawn_blocking(move || {
            render_preview(&image.pixels, image.viewport)
        })
        .await
        .map_err(|e| PreviewError::Task(e.to_string()))??;

        Ok(png)
    }

    /// Sample the clicked pixel of an image and rank it.
    ///
    /// `click` is in display coordinates. Without a click the outcome is
    /// [`PickOutcome::AwaitingClick`]; an unknown image is still an error.
    pub async fn pick(
        &self,
        id: &ImageId,
        click: Option<(f64, f64)>,
    ) -> Result<PickOutcome, ApiError> {
        let image = self.image(id).await?;

        let Some((x, y)) = click else {
            tracing::debug!(image_id = %id, "Pick without click");
            return Ok(PickOutcome::AwaitingClick);
        };

        let (sx, sy) = image.viewport.to_source(x, y)?;
        let color = image.pixel(sx, sy).ok_or_else(|| {
            ApiError::Internal(format!("mapped pixel ({sx}, {sy}) outside image {id}"))
        })?;

        let analysis = self.analyze(color).await?;
        tracing::info!(
            image_id = %id,
            x = sx,
            y = sy,
            color = %color,
            best = analysis.matches.first().map(|m| m.name.as_str()).unwrap_or(""),
            "Picked color"
        );

        Ok(PickOutcome::Matched {
            x: sx,
            y: sy,
            analysis,
        })
    }

    /// Rank the catalog against a single color
    pub async fn analyze(&self, color: Srgb) -> Result<ColorAnalysis, CatalogLoadError> {
        let catalog = self.catalog.get().await?;
        Ok(rank(&catalog, color, self.match_count))
    }
}

/// Convert `color` to Lab and list the `count` nearest catalog entries
pub fn rank(catalog: &Catalog, color: Srgb, count: usize) -> ColorAnalysis {
    let lab = Lab::from(color);
    let matches = catalog
        .nearest(lab, count)
        .into_iter()
        .map(|m| MarkerMatch {
            name: m.entry.name.clone(),
            hex: m.entry.hex.clone(),
            distance: m.distance,
        })
        .collect();

    ColorAnalysis {
        color,
        lab,
        matches,
    }
}
