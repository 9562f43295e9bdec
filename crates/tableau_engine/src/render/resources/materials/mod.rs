//! Lighting materials
//!
//! Named ambient/diffuse/specular presets and the registry the scene looks
//! them up in.

pub mod material;
pub mod material_registry;

pub use material::{still_life_catalog, validate_catalog, Material, MaterialError};
pub use material_registry::MaterialRegistry;
