pub mod artwork_view;
pub mod catalog_display;
pub mod creature_list;
pub mod detail_modal;
pub mod loading_banner;
pub mod palette;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use artwork_view::ArtworkView;
pub use catalog_display::{CatalogDisplay, CatalogDisplayProps};
pub use creature_list::{CreatureList, CreatureListProps};
pub use detail_modal::{detail_modal_area, DetailModal, DetailModalProps};
pub use loading_banner::{LoadingBanner, LoadingBannerProps};
