//! Material presets
//!
//! A material is five lighting parameters under a tag. The still-life scene
//! ships a fixed catalog; configuration may replace it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::math::Vec3;

/// Material catalog errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaterialError {
    /// Two catalog entries share a tag
    #[error("Material tag '{0}' is defined more than once")]
    DuplicateTag(String),

    /// Specular exponent must be positive
    #[error("Material '{tag}' has shininess {shininess}, must be greater than zero")]
    InvalidShininess {
        /// Offending material
        tag: String,
        /// Rejected value
        shininess: f32,
    },
}

/// Lighting parameters for one surface type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Lookup tag
    pub tag: String,
    /// Ambient color
    pub ambient_color: Vec3,
    /// Ambient contribution scale
    pub ambient_strength: f32,
    /// Diffuse color
    pub diffuse_color: Vec3,
    /// Specular color
    pub specular_color: Vec3,
    /// Specular exponent
    pub shininess: f32,
}

impl Material {
    /// Neutral grey material with the given tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ambient_color: Vec3::new(0.2, 0.2, 0.2),
            ambient_strength: 0.2,
            diffuse_color: Vec3::new(0.5, 0.5, 0.5),
            specular_color: Vec3::new(0.2, 0.2, 0.2),
            shininess: 8.0,
        }
    }

    /// Set the ambient color and strength
    pub fn with_ambient(mut self, color: Vec3, strength: f32) -> Self {
        self.ambient_color = color;
        self.ambient_strength = strength;
        self
    }

    /// Set the diffuse color
    pub fn with_diffuse(mut self, color: Vec3) -> Self {
        self.diffuse_color = color;
        self
    }

    /// Set the specular color and exponent
    pub fn with_specular(mut self, color: Vec3, shininess: f32) -> Self {
        self.specular_color = color;
        self.shininess = shininess;
        self
    }
}

/// The seven presets used by the still-life scene, in definition order
pub fn still_life_catalog() -> Vec<Material> {
    vec![
        Material::new("gold")
            .with_ambient(Vec3::new(0.2, 0.2, 0.1), 0.4)
            .with_diffuse(Vec3::new(0.3, 0.3, 0.2))
            .with_specular(Vec3::new(0.6, 0.5, 0.4), 22.0),
        Material::new("cement")
            .with_ambient(Vec3::new(0.2, 0.2, 0.2), 0.2)
            .with_diffuse(Vec3::new(0.5, 0.5, 0.5))
            .with_specular(Vec3::new(0.4, 0.4, 0.4), 0.5),
        Material::new("wood")
            .with_ambient(Vec3::new(0.4, 0.3, 0.1), 0.2)
            .with_diffuse(Vec3::new(0.3, 0.2, 0.1))
            .with_specular(Vec3::new(0.1, 0.1, 0.1), 0.3),
        Material::new("tile")
            .with_ambient(Vec3::new(0.2, 0.3, 0.4), 0.3)
            .with_diffuse(Vec3::new(0.3, 0.2, 0.1))
            .with_specular(Vec3::new(0.4, 0.5, 0.6), 25.0),
        Material::new("glass")
            .with_ambient(Vec3::new(0.4, 0.4, 0.4), 0.3)
            .with_diffuse(Vec3::new(0.3, 0.3, 0.3))
            .with_specular(Vec3::new(0.6, 0.6, 0.6), 85.0),
        Material::new("clay")
            .with_ambient(Vec3::new(0.2, 0.2, 0.3), 0.3)
            .with_diffuse(Vec3::new(0.4, 0.4, 0.5))
            .with_specular(Vec3::new(0.2, 0.2, 0.4), 0.5),
        Material::new("ceramic")
            .with_ambient(Vec3::new(0.8, 0.8, 0.9), 0.4)
            .with_diffuse(Vec3::new(0.7, 0.7, 0.8))
            .with_specular(Vec3::new(0.9, 0.9, 1.0), 32.0),
    ]
}

/// Check tag uniqueness and positive shininess across a catalog
pub fn validate_catalog(catalog: &[Material]) -> Result<(), MaterialError> {
    let mut seen = HashSet::with_capacity(catalog.len());
    for material in catalog {
        if !seen.insert(material.tag.as_str()) {
            return Err(MaterialError::DuplicateTag(material.tag.clone()));
        }
        // Also rejects NaN
        if !(material.shininess > 0.0) {
            return Err(MaterialError::InvalidShininess {
                tag: material.tag.clone(),
                shininess: material.shininess,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_catalog_is_valid() {
        let catalog = still_life_catalog();
        assert_eq!(catalog.len(), 7);
        assert!(validate_catalog(&catalog).is_ok());

        let tags: Vec<_> = catalog.iter().map(|m| m.tag.as_str()).collect();
        assert_eq!(tags, ["gold", "cement", "wood", "tile", "glass", "clay", "ceramic"]);
    }

    #[test]
    fn test_builder_sets_every_field() {
        let m = Material::new("test")
            .with_ambient(Vec3::new(0.1, 0.2, 0.3), 0.4)
            .with_diffuse(Vec3::new(0.5, 0.6, 0.7))
            .with_specular(Vec3::new(0.8, 0.9, 1.0), 12.0);

        assert_relative_eq!(m.ambient_color, Vec3::new(0.1, 0.2, 0.3));
        assert_relative_eq!(m.ambient_strength, 0.4);
        assert_relative_eq!(m.diffuse_color, Vec3::new(0.5, 0.6, 0.7));
        assert_relative_eq!(m.specular_color, Vec3::new(0.8, 0.9, 1.0));
        assert_relative_eq!(m.shininess, 12.0);
    }

    #[test]
    fn test_validation_rejects_duplicates_and_bad_shininess() {
        let duplicate = vec![Material::new("a"), Material::new("a")];
        assert_eq!(
            validate_catalog(&duplicate),
            Err(MaterialError::DuplicateTag("a".to_string()))
        );

        let flat = vec![Material::new("flat").with_specular(Vec3::zeros(), 0.0)];
        assert!(matches!(
            validate_catalog(&flat),
            Err(MaterialError::InvalidShininess { .. })
        ));

        let nan = vec![Material::new("nan").with_specular(Vec3::zeros(), f32::NAN)];
        assert!(validate_catalog(&nan).is_err());
    }
}
