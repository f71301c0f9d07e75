//! Photo library access.
//!
//! The picker never talks to a platform photo store directly. Everything goes
//! through [`PhotoLibrary`], so a directory on disk, an in-memory fake, or a
//! platform media store can back the same UI.

mod directory;
mod memory;

pub use directory::{DirectoryLibrary, DirectoryLibraryConfig, ROOT_ALBUM_NAME};
pub use memory::InMemoryLibrary;

use crate::error::PickerError;
use crate::models::{
    Album, AlbumId, Asset, AssetId, ImageData, ImageResolution, MediaKind, PickedImage,
};
use std::sync::Arc;

/// Which assets an album enumeration returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetFilter {
    AllPhotos,
    AllVideos,
    AllAssets,
}

impl AssetFilter {
    pub fn matches(&self, kind: MediaKind) -> bool {
        match self {
            AssetFilter::AllPhotos => kind == MediaKind::Photo,
            AssetFilter::AllVideos => kind == MediaKind::Video,
            AssetFilter::AllAssets => kind.is_media(),
        }
    }
}

/// Capability interface of a photo library.
///
/// Calls may block (disk access, decoding); UI code should go through
/// [`fetch_albums`] / [`fetch_assets`].
pub trait PhotoLibrary: Send + Sync {
    /// All albums in native enumeration order. Fails when access is denied.
    fn albums(&self) -> Result<Vec<Album>, PickerError>;

    /// Assets of one album in native enumeration order
    fn assets(&self, album: &AlbumId, filter: AssetFilter) -> Result<Vec<Asset>, PickerError>;

    fn image(&self, asset: &AssetId, resolution: ImageResolution)
        -> Result<ImageData, PickerError>;
}

/// Shared library reference usable as a component property.
/// Two handles are equal when they point at the same library.
#[derive(Clone)]
pub struct LibraryHandle(pub Arc<dyn PhotoLibrary>);

impl LibraryHandle {
    pub fn new(library: impl PhotoLibrary + 'static) -> Self {
        Self(Arc::new(library))
    }
}

impl PartialEq for LibraryHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Enumerate albums without blocking the async runtime
pub async fn fetch_albums(library: Arc<dyn PhotoLibrary>) -> Result<Vec<Album>, PickerError> {
    tokio::task::spawn_blocking(move || library.albums())
        .await
        .map_err(|e| PickerError::Other(format!("Task join error: {}", e)))?
}

/// Enumerate the photos of an album without blocking the async runtime
pub async fn fetch_assets(
    library: Arc<dyn PhotoLibrary>,
    album: AlbumId,
) -> Result<Vec<Asset>, PickerError> {
    tokio::task::spawn_blocking(move || library.assets(&album, AssetFilter::AllPhotos))
        .await
        .map_err(|e| PickerError::Other(format!("Task join error: {}", e)))?
}

/// Data URL of an item's grid tile, rendered off the async runtime on first use
pub async fn fetch_thumbnail_url(
    library: Arc<dyn PhotoLibrary>,
    item: PickedImage,
) -> Option<String> {
    let result = tokio::task::spawn_blocking(move || {
        item.thumbnail_data_url(library.as_ref()).map(str::to_owned)
    })
    .await;

    match result {
        Ok(url) => url,
        Err(e) => {
            log::warn!("Thumbnail task failed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(url: &str, kind: MediaKind) -> (Asset, ImageData) {
        (
            Asset {
                id: AssetId::new(url),
                url: url.to_string(),
                kind,
                thumbnail: None,
            },
            ImageData::new(vec![0], "image/png", 1, 1),
        )
    }

    #[test]
    fn test_filter_matches() {
        assert!(AssetFilter::AllPhotos.matches(MediaKind::Photo));
        assert!(!AssetFilter::AllPhotos.matches(MediaKind::Video));
        assert!(AssetFilter::AllVideos.matches(MediaKind::Video));
        assert!(AssetFilter::AllAssets.matches(MediaKind::Video));
        assert!(!AssetFilter::AllAssets.matches(MediaKind::Other));
    }

    #[test]
    fn test_handle_equality_is_identity() {
        let a = LibraryHandle::new(InMemoryLibrary::new());
        let b = LibraryHandle::new(InMemoryLibrary::new());
        assert!(a == a.clone());
        assert!(a != b);
    }

    #[tokio::test]
    async fn test_fetch_helpers() {
        let library: Arc<dyn PhotoLibrary> = Arc::new(InMemoryLibrary::new().with_album(
            "Trip",
            vec![
                asset("mem://1", MediaKind::Photo),
                asset("mem://2", MediaKind::Video),
            ],
        ));

        let albums = fetch_albums(library.clone()).await.unwrap();
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].asset_count, 2);

        let assets = fetch_assets(library, albums[0].id.clone()).await.unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].url, "mem://1");
    }

    #[tokio::test]
    async fn test_fetch_thumbnail_url() {
        let library: Arc<dyn PhotoLibrary> = Arc::new(
            InMemoryLibrary::new().with_album("Trip", vec![asset("mem://1", MediaKind::Photo)]),
        );
        let item = PickedImage::from_asset(asset("mem://1", MediaKind::Photo).0);
        let missing = PickedImage::from_asset(asset("mem://gone", MediaKind::Photo).0);

        let url = fetch_thumbnail_url(library.clone(), item).await;
        assert_eq!(url.as_deref(), Some("data:image/png;base64,AA=="));
        assert!(fetch_thumbnail_url(library, missing).await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_albums_denied() {
        let library: Arc<dyn PhotoLibrary> = Arc::new(InMemoryLibrary::denied());
        let result = fetch_albums(library).await;
        assert!(matches!(result, Err(PickerError::AccessDenied(_))));
    }
}
