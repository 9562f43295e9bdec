//! Material registry
//!
//! Holds the material catalog for one scene. The ordered list is
//! authoritative; the tag index is derived from it and only speeds up
//! lookups, so a missing or stale index never turns a hit into a miss.

use std::collections::HashMap;

use crate::render::api::{uniforms, ShadingStage};

use super::{still_life_catalog, validate_catalog, Material, MaterialError};

/// Tag-addressed material catalog
#[derive(Debug, Clone, Default)]
pub struct MaterialRegistry {
    /// Materials in definition order
    materials: Vec<Material>,
    /// Tag -> position in `materials`
    index: HashMap<String, usize>,
}

impl MaterialRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with the built-in still-life presets
    pub fn define_all(&mut self) {
        self.materials = still_life_catalog();
        self.rebuild_index();
        log::debug!("Defined {} built-in material(s)", self.materials.len());
    }

    /// Replace the contents with `catalog`
    ///
    /// On a validation error the registry is left empty.
    pub fn define(&mut self, catalog: Vec<Material>) -> Result<(), MaterialError> {
        self.materials.clear();
        self.index.clear();

        validate_catalog(&catalog)?;

        self.materials = catalog;
        self.rebuild_index();
        log::debug!("Defined {} material(s)", self.materials.len());
        Ok(())
    }

    /// Material registered under `tag`
    pub fn find(&self, tag: &str) -> Option<&Material> {
        let indexed = self
            .index
            .get(tag)
            .and_then(|&i| self.materials.get(i))
            .filter(|m| m.tag == tag);

        indexed.or_else(|| self.materials.iter().find(|m| m.tag == tag))
    }

    /// Upload the material registered under `tag` to the `material.*` uniforms
    ///
    /// Returns whether a material was found. A miss writes nothing.
    pub fn apply<S>(&self, tag: &str, shading: &mut S) -> bool
    where
        S: ShadingStage + ?Sized,
    {
        let Some(material) = self.find(tag) else {
            log::trace!("No material '{}', skipping upload", tag);
            return false;
        };

        shading.set_vec3(uniforms::material::AMBIENT_COLOR, material.ambient_color);
        shading.set_float(uniforms::material::AMBIENT_STRENGTH, material.ambient_strength);
        shading.set_vec3(uniforms::material::DIFFUSE_COLOR, material.diffuse_color);
        shading.set_vec3(uniforms::material::SPECULAR_COLOR, material.specular_color);
        shading.set_float(uniforms::material::SHININESS, material.shininess);
        true
    }

    /// Recompute the tag index from the ordered list
    pub fn rebuild_index(&mut self) {
        self.index = self
            .materials
            .iter()
            .enumerate()
            .map(|(i, m)| (m.tag.clone(), i))
            .collect();
    }

    /// Drop the tag index; lookups scan the list until [`Self::rebuild_index`]
    pub fn clear_index(&mut self) {
        self.index.clear();
    }

    /// Whether the tag index covers every material
    pub fn is_indexed(&self) -> bool {
        self.index.len() == self.materials.len()
    }

    /// Materials in definition order
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Number of materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether no material is defined
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::api::UniformValue;
    use crate::render::backends::HeadlessDevice;
    use approx::assert_relative_eq;

    #[test]
    fn test_find_returns_exact_catalog_records() {
        let mut registry = MaterialRegistry::new();
        registry.define_all();

        for expected in still_life_catalog() {
            assert_eq!(registry.find(&expected.tag), Some(&expected));
        }
        assert!(registry.find("marble").is_none());
        assert!(registry.find("").is_none());

        let gold = registry.find("gold").unwrap();
        assert_relative_eq!(gold.ambient_color, Vec3::new(0.2, 0.2, 0.1));
        assert_relative_eq!(gold.ambient_strength, 0.4);
        assert_relative_eq!(gold.diffuse_color, Vec3::new(0.3, 0.3, 0.2));
        assert_relative_eq!(gold.specular_color, Vec3::new(0.6, 0.5, 0.4));
        assert_relative_eq!(gold.shininess, 22.0);
    }

    #[test]
    fn test_lookup_falls_back_to_scan_without_index() {
        let mut registry = MaterialRegistry::new();
        registry.define_all();
        registry.clear_index();
        assert!(!registry.is_indexed());

        let glass = registry.find("glass").unwrap();
        assert_relative_eq!(glass.shininess, 85.0);
        assert!(registry.find("marble").is_none());

        registry.rebuild_index();
        assert!(registry.is_indexed());
        assert_eq!(registry.find("glass").map(|m| m.tag.as_str()), Some("glass"));
    }

    #[test]
    fn test_define_all_resets_prior_state() {
        let mut registry = MaterialRegistry::new();
        registry.define(vec![Material::new("custom")]).unwrap();
        assert!(registry.find("custom").is_some());

        registry.define_all();
        assert!(registry.find("custom").is_none());
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn test_invalid_catalog_leaves_registry_empty() {
        let mut registry = MaterialRegistry::new();
        registry.define_all();

        let result = registry.define(vec![Material::new("dup"), Material::new("dup")]);
        assert!(matches!(result, Err(MaterialError::DuplicateTag(_))));
        assert!(registry.is_empty());
        assert!(registry.find("gold").is_none());
    }

    #[test]
    fn test_apply_writes_five_uniforms() {
        let mut registry = MaterialRegistry::new();
        registry.define_all();
        let mut device = HeadlessDevice::new();

        assert!(registry.apply("wood", &mut device));
        assert_eq!(device.commands().len(), 5);
        assert_eq!(
            device.uniform(uniforms::material::AMBIENT_COLOR),
            Some(UniformValue::Vec3(Vec3::new(0.4, 0.3, 0.1)))
        );
        assert_eq!(
            device.uniform(uniforms::material::SHININESS),
            Some(UniformValue::Float(0.3))
        );
    }

    #[test]
    fn test_apply_miss_is_silent() {
        let mut device = HeadlessDevice::new();

        let empty = MaterialRegistry::new();
        assert!(!empty.apply("gold", &mut device));

        let mut registry = MaterialRegistry::new();
        registry.define_all();
        assert!(!registry.apply("marble", &mut device));

        assert!(device.commands().is_empty());
    }
}
