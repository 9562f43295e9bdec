//! # Application Configuration
//!
//! Configuration for the still-life application: logging and frame count,
//! the texture manifest, and optional overrides for the scene script and the
//! material catalog.
//!
//! ## Design Goals
//!
//! - **Data, not code**: texture paths and tags come from the manifest, so a
//!   different set of images can be supplied without touching the scene core
//! - **Serializable**: TOML or RON through the [`Config`] trait
//! - **Forgiving**: every section has defaults, so partial documents load

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError, ConfigFormat};
use crate::render::resources::materials::{self, Material};
use crate::render::resources::textures::MAX_TEXTURE_SLOTS;

/// # Engine Configuration
///
/// Logging and frame-loop settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Number of frames the render loop runs before exiting
    pub frames: u32,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            frames: 1,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the number of frames to render
    pub fn with_frames(mut self, frames: u32) -> Self {
        self.frames = frames;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One `(path, tag)` pair of the texture manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureManifestEntry {
    /// Image path, relative to [`AssetConfig::assets_dir`] unless absolute
    pub path: String,
    /// Tag the texture is registered under
    pub tag: String,
}

impl TextureManifestEntry {
    /// Create a manifest entry
    pub fn new(path: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            tag: tag.into(),
        }
    }
}

/// # Asset Configuration
///
/// Where textures live and which ones the scene loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Base directory for relative texture paths
    pub assets_dir: String,
    /// Texture manifest, loaded in order (order decides slot indices)
    pub textures: Vec<TextureManifestEntry>,
}

impl AssetConfig {
    /// Create the asset configuration for the still-life scene
    pub fn new() -> Self {
        Self {
            assets_dir: "resources/textures".to_string(),
            textures: vec![
                TextureManifestEntry::new("wood.jpg", "wood"),
                TextureManifestEntry::new("greencup.png", "Mug"),
                TextureManifestEntry::new("light.jpg", "light"),
                TextureManifestEntry::new("stainedglass.jpg", "glass"),
                TextureManifestEntry::new("gold-seamless-texture.jpg", "gold"),
            ],
        }
    }

    /// Set assets directory
    pub fn with_assets_dir(mut self, dir: impl Into<String>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    /// Replace the texture manifest
    pub fn with_textures(mut self, textures: Vec<TextureManifestEntry>) -> Self {
        self.textures = textures;
        self
    }

    /// Resolve a manifest entry to the path handed to the image decoder
    pub fn resolve(&self, entry: &TextureManifestEntry) -> PathBuf {
        let path = Path::new(&entry.path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            Path::new(&self.assets_dir).join(path)
        }
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<(), String> {
        if self.textures.len() > MAX_TEXTURE_SLOTS {
            return Err(format!(
                "Texture manifest lists {} entries, only {} slots exist",
                self.textures.len(),
                MAX_TEXTURE_SLOTS
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.textures {
            if entry.tag.is_empty() {
                return Err(format!("Texture '{}' has an empty tag", entry.path));
            }
            if !seen.insert(entry.tag.as_str()) {
                return Err(format!("Duplicate texture tag '{}'", entry.tag));
            }
        }

        Ok(())
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Scene Configuration
///
/// Optional replacements for the built-in scene script and material catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Path to a RON render sequence; the built-in still life when absent
    pub script: Option<String>,
    /// Material catalog; the built-in presets when absent
    pub materials: Option<Vec<Material>>,
}

/// # Complete Application Configuration
///
/// Top-level configuration the application loads at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Logging and frame loop
    pub engine: EngineConfig,
    /// Texture manifest
    pub assets: AssetConfig,
    /// Scene overrides
    pub scene: SceneConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.engine.log_level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }

        if self.engine.frames == 0 {
            return Err("Frame count must be at least 1".to_string());
        }

        self.assets.validate()?;

        if let Some(catalog) = &self.scene.materials {
            materials::validate_catalog(catalog).map_err(|e| e.to_string())?;
        }

        Ok(())
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest_matches_still_life() {
        let config = ApplicationConfig::default();
        let tags: Vec<_> = config.assets.textures.iter().map(|t| t.tag.as_str()).collect();

        assert_eq!(tags, ["wood", "Mug", "light", "glass", "gold"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ApplicationConfig {
            engine: EngineConfig::new().with_log_level("debug").with_frames(3),
            ..Default::default()
        };

        let text = config.render(ConfigFormat::Toml).unwrap();
        let parsed = ApplicationConfig::parse(&text, ConfigFormat::Toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_ron_round_trip_with_material_catalog() {
        let config = ApplicationConfig {
            scene: SceneConfig {
                script: Some("scenes/still_life.ron".to_string()),
                materials: Some(materials::still_life_catalog()),
            },
            ..Default::default()
        };

        let text = config.render(ConfigFormat::Ron).unwrap();
        let parsed = ApplicationConfig::parse(&text, ConfigFormat::Ron).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_file_round_trip_in_both_formats() {
        let config = ApplicationConfig {
            engine: EngineConfig::new().with_frames(7),
            assets: AssetConfig::new().with_assets_dir("res"),
            ..Default::default()
        };

        for ext in ["toml", "ron"] {
            let path = std::env::temp_dir().join(format!("tableau_config_{}.{}", std::process::id(), ext));
            config.save_to_file(&path).unwrap();
            let loaded = ApplicationConfig::load_from_file(&path);
            std::fs::remove_file(&path).ok();
            assert_eq!(loaded.unwrap(), config);
        }

        let unsupported = std::env::temp_dir().join("tableau_config.yaml");
        assert!(matches!(config.save_to_file(&unsupported), Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let text = r#"
            [engine]
            frames = 10

            [assets]
            assets_dir = "/opt/textures"
        "#;

        let config = ApplicationConfig::parse(text, ConfigFormat::Toml).unwrap();
        assert_eq!(config.engine.frames, 10);
        assert_eq!(config.engine.log_level, "info");
        assert_eq!(config.assets.assets_dir, "/opt/textures");
        assert_eq!(config.assets.textures.len(), 5);
        assert!(config.scene.script.is_none());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = ApplicationConfig::default();
        config.engine.frames = 0;
        assert!(config.validate().is_err());

        let mut config = ApplicationConfig::default();
        config.engine.log_level = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = ApplicationConfig::default();
        config.assets.textures.push(TextureManifestEntry::new("other.png", "wood"));
        assert!(config.validate().unwrap_err().contains("Duplicate"));

        let mut config = ApplicationConfig::default();
        config.assets.textures = (0..=MAX_TEXTURE_SLOTS)
            .map(|i| TextureManifestEntry::new(format!("{i}.png"), format!("t{i}")))
            .collect();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let assets = AssetConfig::new().with_assets_dir("res");
        let relative = TextureManifestEntry::new("wood.jpg", "wood");
        assert_eq!(assets.resolve(&relative), Path::new("res").join("wood.jpg"));

        let absolute_path = std::env::temp_dir().join("wood.jpg");
        let absolute = TextureManifestEntry::new(absolute_path.to_string_lossy(), "wood");
        assert_eq!(assets.resolve(&absolute), absolute_path);
    }
}
