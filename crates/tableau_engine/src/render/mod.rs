//! # Rendering
//!
//! Scene-state management between the still-life script and a graphics
//! device:
//! - **api**: the narrow device traits (`ShadingStage`, `TextureDevice`,
//!   `MeshProvider`) and the uniform name table
//! - **primitives**: the fixed shape catalog
//! - **resources**: texture and material registries
//! - **systems**: light setup
//! - **transform**: model matrix composition
//! - **backends**: the headless recording device

pub mod api;
pub mod primitives;
pub mod resources;
pub mod systems;
pub mod transform;

/// Graphics backend implementations
pub mod backends;

pub use api::{
    uniforms, BackendResult, FilterMode, GraphicsDevice, MeshProvider, ShadingStage,
    TextureDevice, TextureFormat, TextureId, TextureParams, UniformValue, WrapMode,
};
pub use backends::{DeviceCommand, HeadlessDevice};
pub use primitives::{ShapeKind, ShapeSet};
pub use resources::materials::{Material, MaterialError, MaterialRegistry};
pub use resources::textures::{TextureEntry, TextureError, TextureRegistry, MAX_TEXTURE_SLOTS};
pub use systems::lighting::{LightSetup, LightSource, MAX_LIGHT_SOURCES};
pub use transform::{compute_model_matrix, ObjectTransform};

use thiserror::Error;

/// Errors reported by a graphics device
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The device could not store the texture
    ///
    /// Raised for malformed pixel buffers or exhausted device memory.
    #[error("Texture upload failed: {0}")]
    TextureUpload(String),

    /// The handle does not name a live texture
    #[error("Unknown texture {0:?}")]
    UnknownTexture(TextureId),

    /// The binding unit is outside the device's range
    #[error("Binding unit {unit} out of range (device has {limit})")]
    InvalidBindingUnit {
        /// Requested unit
        unit: usize,
        /// Number of units
        limit: usize,
    },
}
