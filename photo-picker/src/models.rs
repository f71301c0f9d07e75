use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::camera::CapturedPhoto;
use crate::library::PhotoLibrary;

/// Opaque album handle, resolved through a [`PhotoLibrary`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlbumId(String);

impl AlbumId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque asset handle, resolved through a [`PhotoLibrary`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An album as shown in the album carousel
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    /// Number of assets of any kind
    pub asset_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Photo,
    Video,
    Other,
}

impl MediaKind {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase())
            .as_deref()
        {
            Some("jpg") | Some("jpeg") | Some("png") | Some("webp") | Some("gif")
            | Some("bmp") | Some("tif") | Some("tiff") | Some("heic") | Some("heif") => {
                MediaKind::Photo
            }
            Some("mp4") | Some("mov") | Some("m4v") | Some("avi") | Some("mkv")
            | Some("webm") | Some("3gp") => MediaKind::Video,
            _ => MediaKind::Other,
        }
    }

    pub fn is_media(&self) -> bool {
        !matches!(self, MediaKind::Other)
    }
}

/// One entry of an album enumeration
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub id: AssetId,
    /// Source URL, the identity of a picked image
    pub url: String,
    pub kind: MediaKind,
    pub thumbnail: Option<ImageData>,
}

/// Encoded image bytes, cheap to clone
#[derive(Clone, PartialEq, Eq)]
pub struct ImageData {
    bytes: Arc<[u8]>,
    mime_type: &'static str,
    width: u32,
    height: u32,
}

impl ImageData {
    pub fn new(bytes: Vec<u8>, mime_type: &'static str, width: u32, height: u32) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type,
            width,
            height,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Base64 data URL usable as an `img` source
    pub fn to_data_url(&self) -> String {
        let encoded = general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime_type, encoded)
    }
}

impl std::fmt::Debug for ImageData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageData")
            .field("mime_type", &self.mime_type)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Size variants a library can render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageResolution {
    Thumbnail,      // square grid tile
    FullScreen,     // fitted to a screen-sized bound
    FullResolution, // original file
}

#[derive(Debug, Default)]
struct ImageCache {
    thumbnail: OnceLock<Option<ImageData>>,
    full_screen: OnceLock<Option<ImageData>>,
    full_resolution: OnceLock<Option<ImageData>>,
    thumbnail_url: OnceLock<Option<String>>,
}

/// An image the user can pick, identified by its source URL.
///
/// Larger renditions are fetched on first access and cached. Clones share the
/// cache, so the grid item and the selection entry never fetch twice.
#[derive(Clone)]
pub struct PickedImage {
    url: String,
    asset: Option<AssetId>,
    thumbnail: Option<ImageData>,
    cache: Arc<ImageCache>,
}

impl PickedImage {
    pub fn from_asset(asset: Asset) -> Self {
        Self {
            url: asset.url,
            asset: Some(asset.id),
            thumbnail: asset.thumbnail,
            cache: Arc::new(ImageCache::default()),
        }
    }

    /// Camera captures have no library asset; the edited image serves every size
    pub fn from_capture(photo: CapturedPhoto) -> Self {
        let cache = ImageCache::default();
        let _ = cache.full_screen.set(Some(photo.edited_image.clone()));
        let _ = cache.full_resolution.set(Some(photo.edited_image.clone()));

        Self {
            url: photo.reference_url,
            asset: None,
            thumbnail: Some(photo.edited_image),
            cache: Arc::new(cache),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn asset(&self) -> Option<&AssetId> {
        self.asset.as_ref()
    }

    pub fn thumbnail(&self) -> Option<&ImageData> {
        self.thumbnail.as_ref()
    }

    pub fn is_capture(&self) -> bool {
        self.asset.is_none()
    }

    /// The grid tile: the thumbnail the asset came with, else rendered by
    /// the library on first access
    pub fn thumbnail_image(&self, library: &dyn PhotoLibrary) -> Option<&ImageData> {
        if let Some(thumbnail) = self.thumbnail.as_ref() {
            return Some(thumbnail);
        }
        self.cache
            .thumbnail
            .get_or_init(|| self.fetch(library, ImageResolution::Thumbnail))
            .as_ref()
    }

    pub fn thumbnail_data_url(&self, library: &dyn PhotoLibrary) -> Option<&str> {
        self.cache
            .thumbnail_url
            .get_or_init(|| self.thumbnail_image(library).map(ImageData::to_data_url))
            .as_deref()
    }

    pub fn full_screen_image(&self, library: &dyn PhotoLibrary) -> Option<&ImageData> {
        self.cache
            .full_screen
            .get_or_init(|| self.fetch(library, ImageResolution::FullScreen))
            .as_ref()
    }

    pub fn full_resolution_image(&self, library: &dyn PhotoLibrary) -> Option<&ImageData> {
        self.cache
            .full_resolution
            .get_or_init(|| self.fetch(library, ImageResolution::FullResolution))
            .as_ref()
    }

    /// The display image: the full-screen rendition
    pub fn image(&self, library: &dyn PhotoLibrary) -> Option<&ImageData> {
        self.full_screen_image(library)
    }

    fn fetch(&self, library: &dyn PhotoLibrary, resolution: ImageResolution) -> Option<ImageData> {
        let asset = self.asset.as_ref()?;
        match library.image(asset, resolution) {
            Ok(data) => Some(data),
            Err(e) => {
                log::warn!("Failed to load {:?} image for {}: {}", resolution, self.url, e);
                None
            }
        }
    }
}

/// `file://` URL of a local path, percent-encoded. Relative paths are
/// resolved first; a path that cannot be expressed falls back to its display
/// form and stays usable as an identity key.
pub(crate) fn file_url(path: &Path) -> String {
    let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    match url::Url::from_file_path(&absolute) {
        Ok(url) => url.to_string(),
        Err(()) => format!("file://{}", absolute.display()),
    }
}

impl PartialEq for PickedImage {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for PickedImage {}

impl Hash for PickedImage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

impl std::fmt::Debug for PickedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickedImage")
            .field("url", &self.url)
            .field("asset", &self.asset)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::InMemoryLibrary;

    fn pixel(byte: u8) -> ImageData {
        ImageData::new(vec![byte; 4], "image/png", 1, 1)
    }

    fn asset(url: &str, thumb: u8) -> Asset {
        Asset {
            id: AssetId::new(url),
            url: url.to_string(),
            kind: MediaKind::Photo,
            thumbnail: Some(pixel(thumb)),
        }
    }

    #[test]
    fn test_equality_by_url_only() {
        let a = PickedImage::from_asset(asset("file:///a.jpg", 1));
        let b = PickedImage::from_asset(asset("file:///a.jpg", 2));
        let c = PickedImage::from_asset(asset("file:///c.jpg", 1));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_full_screen_is_memoized() {
        let library = InMemoryLibrary::new().with_album(
            "Album",
            vec![(asset("mem://1", 0), pixel(9))],
        );
        let item = PickedImage::from_asset(asset("mem://1", 0));
        let copy = item.clone();

        assert_eq!(item.full_screen_image(&library), Some(&pixel(9)));
        assert_eq!(copy.image(&library), Some(&pixel(9)));
        assert_eq!(library.image_requests(), 1);

        item.full_resolution_image(&library);
        item.full_resolution_image(&library);
        assert_eq!(library.image_requests(), 2);
    }

    #[test]
    fn test_failed_fetch_is_cached_as_none() {
        let library = InMemoryLibrary::new();
        let item = PickedImage::from_asset(asset("mem://missing", 0));

        assert!(item.full_screen_image(&library).is_none());
        assert!(item.full_screen_image(&library).is_none());
        assert_eq!(library.image_requests(), 1);
    }

    #[test]
    fn test_capture_serves_edited_image_without_library() {
        let library = InMemoryLibrary::new();
        let item = PickedImage::from_capture(CapturedPhoto {
            edited_image: pixel(7),
            reference_url: "file:///capture.jpg".to_string(),
        });

        assert!(item.is_capture());
        assert_eq!(item.image(&library), Some(&pixel(7)));
        assert_eq!(item.full_resolution_image(&library), Some(&pixel(7)));
        assert_eq!(library.image_requests(), 0);
    }

    #[test]
    fn test_data_url() {
        let data = ImageData::new(b"abc".to_vec(), "image/jpeg", 1, 1);
        assert_eq!(data.to_data_url(), "data:image/jpeg;base64,YWJj");

        let library = InMemoryLibrary::new();
        let item = PickedImage::from_asset(Asset {
            thumbnail: Some(data),
            ..asset("mem://x", 0)
        });
        assert_eq!(
            item.thumbnail_data_url(&library),
            Some("data:image/jpeg;base64,YWJj")
        );
        assert_eq!(library.image_requests(), 0);
    }

    #[test]
    fn test_missing_thumbnail_rendered_once() {
        let library = InMemoryLibrary::new().with_album(
            "Album",
            vec![(asset("mem://1", 0), pixel(5))],
        );
        let item = PickedImage::from_asset(Asset {
            thumbnail: None,
            ..asset("mem://1", 0)
        });
        let copy = item.clone();

        assert_eq!(item.thumbnail_image(&library), Some(&pixel(5)));
        assert!(copy.thumbnail_data_url(&library).is_some());
        assert!(item.thumbnail_data_url(&library).is_some());
        assert_eq!(library.image_requests(), 1);
    }

    #[test]
    fn test_file_url_is_percent_encoded() {
        let dir = std::env::temp_dir().join(format!("picker url {}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("a #1.png");
        std::fs::write(&path, b"x").unwrap();

        let url = file_url(&path);
        assert!(url.starts_with("file:///"));
        assert!(url.contains("picker%20url%20"));
        assert!(url.ends_with("/a%20%231.png"));
        assert!(!url.contains(' '));

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_media_kind_from_extension() {
        assert_eq!(MediaKind::from_path(Path::new("a/IMG_1.JPG")), MediaKind::Photo);
        assert_eq!(MediaKind::from_path(Path::new("clip.mov")), MediaKind::Video);
        assert_eq!(MediaKind::from_path(Path::new("notes.txt")), MediaKind::Other);
        assert_eq!(MediaKind::from_path(Path::new("README")), MediaKind::Other);
    }
}
