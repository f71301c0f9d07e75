use super::{AssetFilter, PhotoLibrary};
use crate::error::PickerError;
use crate::models::{Album, AlbumId, Asset, AssetId, ImageData, ImageResolution};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A library held entirely in memory.
///
/// Used as a substitute for the platform library in tests and previews. Both
/// resolutions of an asset return the same stored image.
#[derive(Debug, Default)]
pub struct InMemoryLibrary {
    albums: Vec<(Album, Vec<Asset>)>,
    images: HashMap<AssetId, ImageData>,
    access_denied: bool,
    image_requests: AtomicUsize,
}

impl InMemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// A library whose album enumeration always fails with `AccessDenied`
    pub fn denied() -> Self {
        Self {
            access_denied: true,
            ..Self::default()
        }
    }

    /// Append an album. Assets keep the given order as their native order.
    pub fn with_album(mut self, name: &str, assets: Vec<(Asset, ImageData)>) -> Self {
        let album = Album {
            id: AlbumId::new(format!("memory://album/{}", self.albums.len())),
            name: name.to_string(),
            asset_count: assets.len(),
        };

        let mut album_assets = Vec::with_capacity(assets.len());
        for (asset, image) in assets {
            self.images.insert(asset.id.clone(), image);
            album_assets.push(asset);
        }

        self.albums.push((album, album_assets));
        self
    }

    /// How many times `image()` was called
    pub fn image_requests(&self) -> usize {
        self.image_requests.load(Ordering::SeqCst)
    }
}

impl PhotoLibrary for InMemoryLibrary {
    fn albums(&self) -> Result<Vec<Album>, PickerError> {
        if self.access_denied {
            return Err(PickerError::AccessDenied(
                "photo library access not granted".to_string(),
            ));
        }
        Ok(self.albums.iter().map(|(album, _)| album.clone()).collect())
    }

    fn assets(&self, album: &AlbumId, filter: AssetFilter) -> Result<Vec<Asset>, PickerError> {
        let (_, assets) = self
            .albums
            .iter()
            .find(|(a, _)| &a.id == album)
            .ok_or_else(|| PickerError::NotFound(format!("Album {}", album.as_str())))?;

        Ok(assets
            .iter()
            .filter(|asset| filter.matches(asset.kind))
            .cloned()
            .collect())
    }

    fn image(
        &self,
        asset: &AssetId,
        _resolution: ImageResolution,
    ) -> Result<ImageData, PickerError> {
        self.image_requests.fetch_add(1, Ordering::SeqCst);
        self.images
            .get(asset)
            .cloned()
            .ok_or_else(|| PickerError::NotFound(format!("Asset {}", asset.as_str())))
    }
}
