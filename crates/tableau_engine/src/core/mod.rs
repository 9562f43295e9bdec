//! # Core Module
//!
//! Shared configuration for the scene core and the application that hosts it.
//!
//! ## Organization
//!
//! - **Config**: application, engine, asset and scene configuration

pub mod config;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig,
    EngineConfig,
    AssetConfig,
    SceneConfig,
    TextureManifestEntry,
    Config,
    ConfigError,
    ConfigFormat,
};
