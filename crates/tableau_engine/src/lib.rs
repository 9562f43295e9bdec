//! # Tableau Engine
//!
//! Scene-state management for a fixed 3D still life: a table, a lamp, a mug,
//! a book and a laptop drawn from procedural meshes every frame.
//!
//! ## Features
//!
//! - **Texture Registry**: up to 16 tagged textures, slot == binding unit
//! - **Material Registry**: named lighting presets with tag lookup
//! - **Lighting**: fixed point lights pushed once per preparation
//! - **Render Sequence**: a declarative draw list, built in or loaded from RON
//! - **Headless Device**: a recording backend for running without a GPU
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tableau_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplicationConfig::default();
//!     let mut device = HeadlessDevice::new();
//!
//!     let mut scene = SceneManager::new(Some(&mut device));
//!     scene.prepare(&config.assets, config.scene.materials.clone());
//!     let stats = scene.render_frame();
//!     assert_eq!(stats.draws, 7);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Configuration
pub mod config;
pub mod core;

pub mod foundation;
pub mod assets;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::{ApplicationConfig, AssetConfig, Config, ConfigFormat, TextureManifestEntry},
        foundation::{
            logging,
            math::{Mat4, Vec2, Vec3, Vec4},
        },
        assets::{FileImageDecoder, ImageData, ImageDecoder, MemoryImageDecoder},
        render::{
            GraphicsDevice, HeadlessDevice, LightSetup, Material, MaterialRegistry, ShapeKind,
            TextureRegistry,
        },
        scene::{FrameStats, PrepareReport, RenderSequence, SceneError, SceneManager},
    };
}
