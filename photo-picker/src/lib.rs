//! # Photo Picker
//!
//! A reusable multi-select photo picker: browse albums, pick images up to a
//! configurable maximum, optionally take a new photo, and hand the result to
//! a delegate.
//!
//! The core (selection, grid layout, album carousel, list controller and the
//! picker shell) is plain Rust and renderer independent. Photo stores and
//! cameras plug in through the [`PhotoLibrary`] and [`CameraCapture`] traits.
//! Dioxus components live behind the `components` feature.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use photo_picker::{DirectoryLibrary, ImagePicker, PickerConfig, SystemCamera};
//! use std::sync::Arc;
//!
//! let library = DirectoryLibrary::open("/sdcard/DCIM");
//! let mut picker = ImagePicker::new(
//!     PickerConfig::default(),
//!     Arc::new(library),
//!     Arc::new(SystemCamera::default()),
//! );
//! picker.set_delegate(my_delegate);
//! picker.load_albums();
//! ```

pub mod camera;
pub mod carousel;
pub mod config;
pub mod error;
pub mod layout;
pub mod library;
pub mod list;
pub mod models;
pub mod picker;
pub mod selection;
pub mod thumbnail;

#[cfg(feature = "components")]
pub mod components;

pub use camera::{capture_photo, CameraCapture, CameraHandle, CapturedPhoto, SystemCamera};
pub use carousel::AlbumCarousel;
pub use config::{Color, PickerConfig};
pub use error::PickerError;
pub use layout::{CellAnimation, GridLayout, Orientation, ITEM_SPACING};
pub use library::{
    fetch_albums, fetch_assets, fetch_thumbnail_url, AssetFilter, DirectoryLibrary,
    DirectoryLibraryConfig, InMemoryLibrary, LibraryHandle, PhotoLibrary, ROOT_ALBUM_NAME,
};
pub use list::{AssetRequest, GridCell, ListState, PickerList, TapOutcome};
pub use models::{
    Album, AlbumId, Asset, AssetId, ImageData, ImageResolution, MediaKind, PickedImage,
};
pub use picker::{BarButton, BarButtonItem, ImagePicker, NavigationItem, PickerDelegate};
pub use selection::Selection;

#[cfg(feature = "components")]
pub use components::ImagePickerView;
