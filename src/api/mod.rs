pub mod catalog;
pub mod images;
pub mod page;
pub mod pick;

pub use catalog::{__path_handle_catalog, __path_handle_match};
pub use catalog::{handle_catalog, handle_match, CatalogEntry, CatalogResponse, MatchResponse};
pub use images::{__path_handle_load_image, __path_handle_preview};
pub use images::{handle_load_image, handle_preview, LoadImageRequest, LoadImageResponse};
pub use page::{handle_index, handle_static};
pub use pick::__path_handle_pick;
pub use pick::{
    handle_pick, ColorInfo, LabValue, MatchEntry, PickRequest, PickResponse, PixelPosition,
    RgbValue, SelectedColor, AWAITING_CLICK_MESSAGE,
};
