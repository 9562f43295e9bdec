//! Asset loading
//!
//! Only images are loaded from disk; meshes come from the device's procedural
//! shape catalog.

pub mod image_loader;

pub use image_loader::{ImageData, ImageDecoder, FileImageDecoder, MemoryImageDecoder};

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),
}
