//! The album grid: albums, the photos of the current album, and the
//! mapping from grid positions to cells.
//!
//! Loading is split in a `begin`/`apply` pair so the blocking library calls
//! can run off the UI task. Every asset load carries a generation; when the
//! user switches albums or the album list is reloaded before a load
//! finished, the late result is dropped.

use crate::carousel::AlbumCarousel;
use crate::error::PickerError;
use crate::library::{AssetFilter, PhotoLibrary};
use crate::models::{Album, AlbumId, Asset, MediaKind, PickedImage};
use crate::selection::Selection;

/// What the grid area shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Ready,
    /// Album enumeration failed; the access-denied message replaces the grid
    AccessDenied,
}

/// A pending asset load for one album
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    pub album: AlbumId,
    generation: u64,
}

/// One position of the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridCell<'a> {
    TakePhoto,
    Photo(&'a PickedImage),
}

/// Result of tapping a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    Selected,
    Deselected,
    /// Selecting would exceed the maximum
    Rejected,
    /// Nothing to do (e.g. re-tapping the single selected image)
    Unchanged,
    LaunchCamera,
    CameraUnavailable,
}

#[derive(Debug, Clone)]
pub struct PickerList {
    albums: Vec<Album>,
    carousel: AlbumCarousel,
    items: Vec<PickedImage>,
    state: ListState,
    generation: u64,
    show_take_photo: bool,
    allows_multiple_selection: bool,
}

impl PickerList {
    pub fn new(show_take_photo: bool, allows_multiple_selection: bool) -> Self {
        Self {
            albums: Vec::new(),
            carousel: AlbumCarousel::default(),
            items: Vec::new(),
            state: ListState::Loading,
            generation: 0,
            show_take_photo,
            allows_multiple_selection,
        }
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn carousel(&self) -> &AlbumCarousel {
        &self.carousel
    }

    pub fn items(&self) -> &[PickedImage] {
        &self.items
    }

    /// Take the result of an album enumeration.
    ///
    /// Any pending [`AssetRequest`] becomes stale. On failure the list
    /// switches to `AccessDenied` and nothing is loaded. On success the
    /// non-empty albums are kept, most recently enumerated first, and the
    /// first album is selected.
    pub fn apply_albums(&mut self, result: Result<Vec<Album>, PickerError>) -> Option<AssetRequest> {
        self.generation += 1;

        let albums = match result {
            Ok(albums) => albums,
            Err(e) => {
                log::warn!("Photo library not accessible: {}", e);
                self.state = ListState::AccessDenied;
                self.albums.clear();
                self.items.clear();
                self.carousel.reload(Vec::new());
                return None;
            }
        };

        let mut kept = Vec::with_capacity(albums.len());
        for album in albums {
            if album.asset_count != 0 {
                kept.insert(0, album);
            }
        }
        log::info!("Loaded {} albums", kept.len());

        self.carousel
            .reload(kept.iter().map(|album| album.name.clone()).collect());
        self.albums = kept;

        if self.albums.is_empty() {
            self.items.clear();
            self.state = ListState::Ready;
            return None;
        }
        self.select_album(0)
    }

    /// Album picked in the carousel. Re-selecting the current album is a no-op.
    pub fn select_album(&mut self, index: usize) -> Option<AssetRequest> {
        if !self.carousel.did_select_item(index) {
            return None;
        }
        self.begin_asset_load(index)
    }

    /// Clear the grid and start loading an album, superseding earlier loads
    pub fn begin_asset_load(&mut self, index: usize) -> Option<AssetRequest> {
        let album = self.albums.get(index)?;
        self.generation += 1;
        self.items.clear();
        self.state = ListState::Loading;

        Some(AssetRequest {
            album: album.id.clone(),
            generation: self.generation,
        })
    }

    /// Take the result of an asset enumeration. Returns false for stale results.
    ///
    /// Photos are inserted at the front, so the newest asset comes first.
    pub fn apply_assets(
        &mut self,
        request: &AssetRequest,
        result: Result<Vec<Asset>, PickerError>,
    ) -> bool {
        if request.generation != self.generation {
            log::debug!(
                "Dropping stale assets for {} (generation {} < {})",
                request.album.as_str(),
                request.generation,
                self.generation
            );
            return false;
        }

        self.items.clear();
        match result {
            Ok(assets) => {
                for asset in assets {
                    if asset.kind == MediaKind::Photo {
                        self.items.insert(0, PickedImage::from_asset(asset));
                    }
                }
            }
            Err(e) => log::error!("Failed to load album {}: {}", request.album.as_str(), e),
        }

        self.state = ListState::Ready;
        true
    }

    /// Enumerate albums and the first album's photos synchronously
    pub fn load_albums(&mut self, library: &dyn PhotoLibrary) {
        if let Some(request) = self.apply_albums(library.albums()) {
            self.load_assets(library, &request);
        }
    }

    pub fn load_assets(&mut self, library: &dyn PhotoLibrary, request: &AssetRequest) {
        let result = library.assets(&request.album, AssetFilter::AllPhotos);
        self.apply_assets(request, result);
    }

    fn camera_offset(&self) -> usize {
        usize::from(self.show_take_photo)
    }

    /// Number of grid cells. The camera tile never shows alone.
    pub fn item_count(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.items.len() + self.camera_offset()
        }
    }

    pub fn cell(&self, index: usize) -> Option<GridCell<'_>> {
        if index >= self.item_count() {
            return None;
        }
        if self.show_take_photo && index == 0 {
            return Some(GridCell::TakePhoto);
        }
        self.items
            .get(index - self.camera_offset())
            .map(GridCell::Photo)
    }

    pub fn is_selected(&self, index: usize, selection: &Selection) -> bool {
        match self.cell(index) {
            Some(GridCell::Photo(item)) => selection.contains(item),
            _ => false,
        }
    }

    /// Whether a tap on a not-yet-selected cell may select it
    pub fn should_select(&self, selection: &Selection) -> bool {
        selection.can_add()
    }

    /// Handle a tap on a grid cell.
    ///
    /// The camera tile never touches the selection. Gallery cells toggle; in
    /// single-selection mode a new image replaces the previous one.
    pub fn tap(
        &self,
        index: usize,
        selection: &mut Selection,
        camera_available: bool,
    ) -> TapOutcome {
        let item = match self.cell(index) {
            None => return TapOutcome::Unchanged,
            Some(GridCell::TakePhoto) => {
                if !self.should_select(selection) {
                    return TapOutcome::Rejected;
                }
                return if camera_available {
                    TapOutcome::LaunchCamera
                } else {
                    TapOutcome::CameraUnavailable
                };
            }
            Some(GridCell::Photo(item)) => item,
        };

        if selection.contains(item) {
            if !self.allows_multiple_selection {
                return TapOutcome::Unchanged;
            }
            selection.remove(item);
            return TapOutcome::Deselected;
        }

        if !self.allows_multiple_selection {
            return match selection.replace(vec![item.clone()]) {
                Ok(()) => TapOutcome::Selected,
                Err(_) => TapOutcome::Rejected,
            };
        }

        if !self.should_select(selection) {
            return TapOutcome::Rejected;
        }
        match selection.add(item.clone()) {
            Ok(_) => TapOutcome::Selected,
            Err(_) => TapOutcome::Rejected,
        }
    }
}
