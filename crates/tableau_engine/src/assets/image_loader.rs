//! Image loading utilities for texture data
//!
//! Decodes PNG and JPEG files into tightly packed 8-bit pixel rows. Rows are
//! flipped on decode so that row 0 is the bottom of the image, which is the
//! convention texture coordinates use (v = 0 at the bottom).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::assets::AssetError;

/// Decoded image data ready for GPU upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw pixel data, `channels` bytes per pixel, bottom row first
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels in the source image (1 to 4)
    pub channels: u8,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(AssetError::NotFound(path_ref.display().to_string()));
        }

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image {}: {}", path_ref.display(), e)))?;

        let image = Self::from_dynamic(img);
        log::debug!(
            "Decoded image {}x{} with {} channel(s) from {:?}",
            image.width, image.height, image.channels, path_ref
        );

        Ok(image)
    }

    /// Load image from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image from bytes: {}", e)))?;

        Ok(Self::from_dynamic(img))
    }

    /// Flip and pack a decoded image, keeping the source channel count
    fn from_dynamic(img: DynamicImage) -> Self {
        let img = img.flipv();
        let channels = img.color().channel_count();
        let (width, height) = (img.width(), img.height());

        let data = match channels {
            1 => img.into_luma8().into_raw(),
            2 => img.into_luma_alpha8().into_raw(),
            3 => img.into_rgb8().into_raw(),
            _ => img.into_rgba8().into_raw(),
        };

        Self {
            data,
            width,
            height,
            channels,
        }
    }

    /// Create a solid color image (useful for testing and defaults)
    ///
    /// The channel count is the length of `color`.
    pub fn solid_color(width: u32, height: u32, color: &[u8]) -> Self {
        let pixel_count = (width * height) as usize;
        let data = color.repeat(pixel_count);

        Self {
            data,
            width,
            height,
            channels: color.len() as u8,
        }
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Bytes in one row of pixels
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.channels as usize
    }
}

/// Source of decoded images
///
/// The texture registry only ever sees this trait, so tests and alternative
/// asset sources can stand in for the file system.
pub trait ImageDecoder {
    /// Decode the image at `path`
    fn decode(&self, path: &Path) -> Result<ImageData, AssetError>;
}

/// Decoder reading image files through the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageDecoder;

impl ImageDecoder for FileImageDecoder {
    fn decode(&self, path: &Path) -> Result<ImageData, AssetError> {
        ImageData::from_file(path)
    }
}

/// Decoder serving pre-decoded images from memory, keyed by path
#[derive(Debug, Clone, Default)]
pub struct MemoryImageDecoder {
    images: HashMap<PathBuf, ImageData>,
}

impl MemoryImageDecoder {
    /// Create an empty decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `image` for `path`
    pub fn with_image(mut self, path: impl Into<PathBuf>, image: ImageData) -> Self {
        self.images.insert(path.into(), image);
        self
    }

    /// Serve `image` for `path`, replacing any previous image
    pub fn insert(&mut self, path: impl Into<PathBuf>, image: ImageData) {
        self.images.insert(path.into(), image);
    }
}

impl ImageDecoder for MemoryImageDecoder {
    fn decode(&self, path: &Path) -> Result<ImageData, AssetError> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_image_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tableau_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, &[255, 0, 0, 255]);
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 4);
        assert_eq!(img.channels, 4);
        assert_eq!(img.size_bytes(), 4 * 4 * 4);
        assert_eq!(img.row_bytes(), 16);

        // Check first pixel is red
        assert_eq!(&img.data[0..4], &[255, 0, 0, 255]);

        let rgb = ImageData::solid_color(2, 3, &[1, 2, 3]);
        assert_eq!(rgb.channels, 3);
        assert_eq!(rgb.size_bytes(), 2 * 3 * 3);
    }

    #[test]
    fn test_rows_are_flipped_on_decode() {
        let path = temp_image_path("flip.png");
        // Top row red, bottom row blue
        let source = image::RgbImage::from_fn(1, 2, |_, y| {
            if y == 0 { image::Rgb([255, 0, 0]) } else { image::Rgb([0, 0, 255]) }
        });
        source.save(&path).unwrap();

        let decoded = FileImageDecoder.decode(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(decoded.channels, 3);
        assert_eq!((decoded.width, decoded.height), (1, 2));
        assert_eq!(&decoded.data[0..3], &[0, 0, 255], "bottom row should come first");
        assert_eq!(&decoded.data[3..6], &[255, 0, 0]);
    }

    #[test]
    fn test_source_channel_count_is_reported() {
        let rgba_path = temp_image_path("rgba.png");
        image::RgbaImage::from_pixel(2, 2, image::Rgba([9, 8, 7, 6])).save(&rgba_path).unwrap();
        let gray_path = temp_image_path("gray.png");
        image::GrayImage::from_pixel(2, 2, image::Luma([42])).save(&gray_path).unwrap();

        let rgba = ImageData::from_file(&rgba_path);
        let gray = ImageData::from_file(&gray_path);
        std::fs::remove_file(&rgba_path).ok();
        std::fs::remove_file(&gray_path).ok();

        let rgba = rgba.unwrap();
        assert_eq!(rgba.channels, 4);
        assert_eq!(rgba.size_bytes(), 2 * 2 * 4);

        let gray = gray.unwrap();
        assert_eq!(gray.channels, 1);
        assert_eq!(gray.data, vec![42; 4]);
    }

    #[test]
    fn test_missing_and_corrupt_files() {
        let missing = temp_image_path("does_not_exist.png");
        assert!(matches!(ImageData::from_file(&missing), Err(AssetError::NotFound(_))));

        let corrupt = temp_image_path("corrupt.png");
        std::fs::write(&corrupt, b"definitely not a png").unwrap();
        let result = ImageData::from_file(&corrupt);
        std::fs::remove_file(&corrupt).ok();
        assert!(matches!(result, Err(AssetError::LoadFailed(_))));

        assert!(ImageData::from_bytes(&[0, 1, 2, 3]).is_err());
    }

    #[test]
    fn test_memory_decoder_serves_by_path() {
        let decoder = MemoryImageDecoder::new()
            .with_image("textures/wood.jpg", ImageData::solid_color(1, 1, &[1, 2, 3]));

        let image = decoder.decode(Path::new("textures/wood.jpg")).unwrap();
        assert_eq!(image.channels, 3);
        assert!(matches!(
            decoder.decode(Path::new("textures/gold.jpg")),
            Err(AssetError::NotFound(_))
        ));
    }
}
