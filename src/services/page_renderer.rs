use tera::{Context, Tera};

use crate::assets::{AssetLoader, INDEX_TEMPLATE};
use crate::models::AppConfig;

/// Error type for page rendering
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),

    #[error("Failed to read template: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders the single HTML page of the picker
pub struct PageRenderer {
    tera: Tera,
    max_width: u32,
    max_height: u32,
    match_count: usize,
}

impl PageRenderer {
    /// Compile the embedded page template
    pub fn new(config: &AppConfig) -> Result<Self, PageError> {
        let mut tera = Tera::default();
        tera.add_raw_template(INDEX_TEMPLATE, &AssetLoader::index_template()?)?;

        tracing::debug!("Page template compiled");

        Ok(Self {
            tera,
            max_width: config.display.max_width,
            max_height: config.display.max_height,
            match_count: config.matching.count,
        })
    }

    /// Render the page, optionally with the URL field filled in
    pub fn render_index(&self, image_url: Option<&str>) -> Result<String, PageError> {
        let mut context = Context::new();
        context.insert("title", "Copic Marker Color Picker");
        context.insert("version", env!("CARGO_PKG_VERSION"));
        context.insert("image_url", image_url.unwrap_or(""));
        context.insert("max_width", &self.max_width);
        context.insert("max_height", &self.max_height);
        context.insert("match_count", &self.match_count);

        Ok(self.tera.render(INDEX_TEMPLATE, &context)?)
    }
}
