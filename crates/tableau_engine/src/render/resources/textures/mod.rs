//! Texture resources

pub mod texture_registry;

pub use texture_registry::{TextureEntry, TextureError, TextureRegistry, MAX_TEXTURE_SLOTS};
