use image::{imageops::FilterType, DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

use crate::error::PickerError;
use crate::models::ImageData;

/// Square thumbnail, center-cropped to fill `size`×`size` (WebP)
pub fn render_thumbnail(path: &Path, size: u32) -> Result<ImageData, PickerError> {
    log::debug!("Rendering {}px thumbnail for {:?}", size, path);

    let img = image::open(path)?;
    let thumb = img.resize_to_fill(size, size, FilterType::Lanczos3);
    encode(&thumb, ImageFormat::WebP)
}

/// Aspect-preserving rendition that fits into `max`×`max` (JPEG).
/// Images already inside the bound are not upscaled.
pub fn render_fitted(path: &Path, max: u32) -> Result<ImageData, PickerError> {
    let img = image::open(path)?;
    let (width, height) = fitted_dimensions(img.width(), img.height(), max);

    let fitted = if (width, height) == (img.width(), img.height()) {
        img
    } else {
        img.resize_exact(width, height, FilterType::Lanczos3)
    };

    // JPEG has no alpha channel
    encode(&DynamicImage::ImageRgb8(fitted.to_rgb8()), ImageFormat::Jpeg)
}

/// The original file, untouched
pub fn read_original(path: &Path) -> Result<ImageData, PickerError> {
    let bytes = std::fs::read(path)?;
    let (width, height) = image::image_dimensions(path)?;
    Ok(ImageData::new(bytes, guess_mime_from_ext(path), width, height))
}

/// Dimensions after fitting into a square bound, keeping the aspect ratio
pub fn fitted_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }

    let ratio = (width as f32 / max as f32).max(height as f32 / max as f32);
    if ratio > 1.0 {
        let new_width = ((width as f32 / ratio).round() as u32).max(1);
        let new_height = ((height as f32 / ratio).round() as u32).max(1);
        (new_width, new_height)
    } else {
        (width, height)
    }
}

fn encode(img: &DynamicImage, format: ImageFormat) -> Result<ImageData, PickerError> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, format)
        .map_err(|e| PickerError::Image(format!("Failed to encode {:?}: {}", format, e)))?;

    let mime = match format {
        ImageFormat::WebP => "image/webp",
        ImageFormat::Png => "image/png",
        _ => "image/jpeg",
    };
    Ok(ImageData::new(buffer.into_inner(), mime, img.width(), img.height()))
}

fn guess_mime_from_ext(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        Some("heic") | Some("heif") => "image/heic",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::path::PathBuf;

    fn write_png(width: u32, height: u32) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("photo-picker-thumb-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("source.png");
        RgbImage::from_pixel(width, height, Rgb([200, 40, 40]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_fitted_dimensions() {
        // Larger than the bound
        let (w, h) = fitted_dimensions(2000, 1500, 1000);
        assert_eq!((w, h), (1000, 750));

        // Portrait
        let (w, h) = fitted_dimensions(1500, 3000, 1000);
        assert_eq!((w, h), (500, 1000));

        // Already inside
        assert_eq!(fitted_dimensions(800, 600, 1024), (800, 600));
    }

    #[test]
    fn test_thumbnail_is_square() {
        let path = write_png(300, 120);
        let thumb = render_thumbnail(&path, 64).unwrap();
        assert_eq!(thumb.dimensions(), (64, 64));
        assert_eq!(thumb.mime_type(), "image/webp");
    }

    #[test]
    fn test_fitted_rendition() {
        let path = write_png(400, 200);
        let fitted = render_fitted(&path, 100).unwrap();
        assert_eq!(fitted.dimensions(), (100, 50));
        assert_eq!(fitted.mime_type(), "image/jpeg");

        let untouched = render_fitted(&path, 1000).unwrap();
        assert_eq!(untouched.dimensions(), (400, 200));
    }

    #[test]
    fn test_read_original() {
        let path = write_png(10, 20);
        let original = read_original(&path).unwrap();
        assert_eq!(original.mime_type(), "image/png");
        assert_eq!(original.dimensions(), (10, 20));
        assert_eq!(original.bytes(), std::fs::read(&path).unwrap().as_slice());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let missing = std::env::temp_dir().join(format!("{}.png", uuid::Uuid::new_v4()));
        assert!(render_thumbnail(&missing, 64).is_err());
    }
}
