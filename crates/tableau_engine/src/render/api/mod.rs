//! Device-facing API
//!
//! Traits the scene core consumes and the value types that cross them.

pub mod shading;
pub mod device;

pub use shading::{ShadingStage, UniformValue, uniforms};
pub use device::{
    BackendResult, FilterMode, GraphicsDevice, MeshProvider, TextureDevice, TextureFormat,
    TextureId, TextureParams, WrapMode,
};
