//! Device abstraction traits for the scene core
//!
//! The scene never talks to a graphics API directly. It needs three narrow
//! capabilities, each a trait here, and a device usually provides all three
//! (see [`GraphicsDevice`]).

use crate::assets::ImageData;
use crate::render::api::ShadingStage;
use crate::render::primitives::ShapeKind;
use crate::render::RenderError;

/// Result type for device operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Opaque handle to a GPU texture owned by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Pixel layouts accepted for upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 8-bit RGB
    Rgb8,
    /// 8-bit RGBA
    Rgba8,
}

impl TextureFormat {
    /// Upload format for a decoded image with `channels` channels
    ///
    /// Only RGB and RGBA sources are supported.
    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            3 => Some(TextureFormat::Rgb8),
            4 => Some(TextureFormat::Rgba8),
            _ => None,
        }
    }

    /// Bytes per pixel
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            TextureFormat::Rgb8 => 3,
            TextureFormat::Rgba8 => 4,
        }
    }
}

/// Texture filtering modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Nearest neighbor filtering
    Nearest,
    /// Linear filtering
    Linear,
}

/// Texture wrapping modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Repeat the texture
    Repeat,
    /// Mirror the texture
    MirroredRepeat,
    /// Clamp to edge
    ClampToEdge,
}

/// Texture sampling and mip parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureParams {
    /// Wrapping along U and V
    pub wrap_mode: WrapMode,
    /// Filter within a mip level when minifying
    pub min_filter: FilterMode,
    /// Filter between mip levels when minifying; `None` disables mip sampling
    pub mipmap_filter: Option<FilterMode>,
    /// Filter when magnifying
    pub mag_filter: FilterMode,
    /// Generate the mip chain after upload
    pub generate_mipmaps: bool,
}

impl TextureParams {
    /// Whether minification blends across mip levels and texels
    pub fn is_trilinear(&self) -> bool {
        self.min_filter == FilterMode::Linear
            && self.mipmap_filter == Some(FilterMode::Linear)
            && self.generate_mipmaps
    }
}

impl Default for TextureParams {
    /// Repeat wrapping, trilinear minification, linear magnification
    fn default() -> Self {
        Self {
            wrap_mode: WrapMode::Repeat,
            min_filter: FilterMode::Linear,
            mipmap_filter: Some(FilterMode::Linear),
            mag_filter: FilterMode::Linear,
            generate_mipmaps: true,
        }
    }
}

/// GPU texture storage and binding units
pub trait TextureDevice {
    /// Upload `image` as a 2D texture and return its handle
    fn create_texture(
        &mut self,
        image: &ImageData,
        format: TextureFormat,
        params: &TextureParams,
    ) -> BackendResult<TextureId>;

    /// Bind `texture` to binding unit `unit`
    fn bind_texture(&mut self, unit: usize, texture: TextureId) -> BackendResult<()>;

    /// Release `texture`; unknown handles are ignored
    fn delete_texture(&mut self, texture: TextureId);
}

/// Procedural mesh source
pub trait MeshProvider {
    /// Generate and upload the mesh for `shape`; called once per shape
    fn load_mesh(&mut self, shape: ShapeKind);

    /// Draw `shape` with the currently bound transform and shading state
    fn draw_mesh(&mut self, shape: ShapeKind);
}

/// Everything the scene needs from a graphics device
pub trait GraphicsDevice: ShadingStage + TextureDevice + MeshProvider {}

impl<T: ShadingStage + TextureDevice + MeshProvider + ?Sized> GraphicsDevice for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_trilinear_repeat() {
        let params = TextureParams::default();
        assert_eq!(params.wrap_mode, WrapMode::Repeat);
        assert_eq!(params.mag_filter, FilterMode::Linear);
        assert!(params.is_trilinear());

        let nearest = TextureParams { mipmap_filter: None, ..params };
        assert!(!nearest.is_trilinear());
    }

    #[test]
    fn test_format_from_channels() {
        assert_eq!(TextureFormat::from_channels(3), Some(TextureFormat::Rgb8));
        assert_eq!(TextureFormat::from_channels(4), Some(TextureFormat::Rgba8));
        assert_eq!(TextureFormat::from_channels(1), None);
        assert_eq!(TextureFormat::from_channels(2), None);
        assert_eq!(TextureFormat::Rgba8.bytes_per_pixel(), 4);
    }
}
