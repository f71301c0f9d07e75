use super::{AssetFilter, PhotoLibrary};
use crate::error::PickerError;
use crate::models::{
    file_url, Album, AlbumId, Asset, AssetId, ImageData, ImageResolution, MediaKind,
};
use crate::thumbnail;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Name of the album holding media that sits directly in the library root
pub const ROOT_ALBUM_NAME: &str = "Camera Roll";

/// Configuration for a directory-backed library
#[derive(Debug, Clone)]
pub struct DirectoryLibraryConfig {
    /// Library root; each sub-directory is an album
    pub root: PathBuf,
    pub thumbnail_size: u32,
    /// Bound for the full-screen rendition
    pub full_screen_size: u32,
}

impl Default for DirectoryLibraryConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            thumbnail_size: 256,
            full_screen_size: 1920,
        }
    }
}

/// A photo library on the local filesystem.
///
/// Albums are the sub-directories of the root (by name), followed by
/// [`ROOT_ALBUM_NAME`] when the root itself holds media. Assets are enumerated
/// oldest first and carry no thumbnail; tiles are rendered on request through
/// [`ImageResolution::Thumbnail`]. Ids are file paths and never leave the root.
#[derive(Debug, Clone)]
pub struct DirectoryLibrary {
    config: DirectoryLibraryConfig,
}

impl DirectoryLibrary {
    pub fn new(config: DirectoryLibraryConfig) -> Self {
        Self { config }
    }

    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self::new(DirectoryLibraryConfig {
            root: root.into(),
            ..DirectoryLibraryConfig::default()
        })
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// Resolve an id to a path inside the root
    fn resolve(&self, id: &str) -> Result<PathBuf, PickerError> {
        let root = self.config.root.canonicalize()?;
        let path = Path::new(id)
            .canonicalize()
            .map_err(|_| PickerError::NotFound(id.to_string()))?;

        if !path.starts_with(&root) {
            return Err(PickerError::NotFound(id.to_string()));
        }
        Ok(path)
    }

    fn asset_for(path: PathBuf, kind: MediaKind) -> Asset {
        Asset {
            id: AssetId::new(path.to_string_lossy()),
            url: file_url(&path),
            kind,
            thumbnail: None,
        }
    }
}

impl PhotoLibrary for DirectoryLibrary {
    fn albums(&self) -> Result<Vec<Album>, PickerError> {
        let root = &self.config.root;
        let mut directories: Vec<PathBuf> = fs::read_dir(root)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir() && !is_hidden(path))
            .collect();
        directories.sort();

        let mut albums = Vec::with_capacity(directories.len() + 1);
        for dir in directories {
            let asset_count = match media_files(&dir) {
                Ok(files) => files.len(),
                Err(e) => {
                    log::warn!("Skipping unreadable album {:?}: {}", dir, e);
                    continue;
                }
            };
            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            albums.push(Album {
                id: AlbumId::new(dir.to_string_lossy()),
                name,
                asset_count,
            });
        }

        let root_count = media_files(root)?.len();
        if root_count > 0 {
            albums.push(Album {
                id: AlbumId::new(root.to_string_lossy()),
                name: ROOT_ALBUM_NAME.to_string(),
                asset_count: root_count,
            });
        }

        log::info!("Found {} albums in {:?}", albums.len(), root);
        Ok(albums)
    }

    fn assets(&self, album: &AlbumId, filter: AssetFilter) -> Result<Vec<Asset>, PickerError> {
        let dir = self.resolve(album.as_str())?;

        let assets = media_files(&dir)?
            .into_iter()
            .filter(|(_, kind)| filter.matches(*kind))
            .map(|(path, kind)| Self::asset_for(path, kind))
            .collect::<Vec<_>>();

        log::debug!("Album {:?}: {} assets", dir, assets.len());
        Ok(assets)
    }

    fn image(
        &self,
        asset: &AssetId,
        resolution: ImageResolution,
    ) -> Result<ImageData, PickerError> {
        let path = self.resolve(asset.as_str())?;
        match resolution {
            ImageResolution::Thumbnail => {
                thumbnail::render_thumbnail(&path, self.config.thumbnail_size)
            }
            ImageResolution::FullScreen => {
                thumbnail::render_fitted(&path, self.config.full_screen_size)
            }
            ImageResolution::FullResolution => thumbnail::read_original(&path),
        }
    }
}

/// Media files directly inside `dir`, oldest first
fn media_files(dir: &Path) -> Result<Vec<(PathBuf, MediaKind)>, PickerError> {
    let mut files: Vec<(Option<SystemTime>, PathBuf, MediaKind)> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file() && !is_hidden(&entry.path()))
        .filter_map(|entry| {
            let path = entry.path();
            let kind = MediaKind::from_path(&path);
            if !kind.is_media() {
                return None;
            }
            let modified = entry.metadata().and_then(|m| m.modified()).ok();
            Some((modified, path, kind))
        })
        .collect();

    files.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    Ok(files.into_iter().map(|(_, path, kind)| (path, kind)).collect())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}
