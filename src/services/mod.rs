pub mod catalog_loader;
pub mod catalog_parquet;
pub mod color_picker;
pub mod http_fetch;
pub mod image_fetcher;
pub mod image_store;
pub mod page_renderer;

pub use catalog_loader::{parse_catalog, write_catalog_csv, CatalogLoader, CatalogSource};
pub use catalog_parquet::write_catalog_parquet;
pub use color_picker::{rank, ColorAnalysis, ColorPicker, MarkerMatch, PickOutcome};
pub use http_fetch::HttpFetcher;
pub use image_fetcher::{decode_image, ImageFetcher};
pub use image_store::{ImageStore, InMemoryImageStore};
pub use page_renderer::{PageError, PageRenderer};
