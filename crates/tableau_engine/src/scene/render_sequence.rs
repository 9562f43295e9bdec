//! Render sequence
//!
//! The scene is a flat list of draw instructions executed in order every
//! frame. The still life is built in as a `const` slice; a RON script can
//! replace it.

use std::borrow::Cow;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::render::primitives::{ShapeKind, ShapeSet};
use crate::render::transform::ObjectTransform;
use crate::scene::SceneError;

/// How a draw is shaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shading {
    /// Lighting material plus a registered texture
    Material {
        /// Material tag
        material: Cow<'static, str>,
        /// Texture tag
        texture: Cow<'static, str>,
    },
    /// Flat RGBA color, no texture
    Color([f32; 4]),
}

impl Shading {
    /// Material plus texture shading from static tags
    pub const fn textured(material: &'static str, texture: &'static str) -> Self {
        Shading::Material {
            material: Cow::Borrowed(material),
            texture: Cow::Borrowed(texture),
        }
    }
}

/// One object of the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawInstruction {
    /// Name used in logs
    pub label: Cow<'static, str>,
    /// Mesh to draw
    pub shape: ShapeKind,
    /// Model transform
    #[serde(default)]
    pub transform: ObjectTransform,
    /// Shading state set before the draw
    pub shading: Shading,
    /// Texture coordinate scale; left unchanged when absent
    #[serde(default)]
    pub uv_scale: Option<[f32; 2]>,
}

impl DrawInstruction {
    const fn fixed(
        label: &'static str,
        shape: ShapeKind,
        transform: ObjectTransform,
        shading: Shading,
    ) -> Self {
        Self {
            label: Cow::Borrowed(label),
            shape,
            transform,
            shading,
            uv_scale: None,
        }
    }
}

/// Table, lamp, mug, book and laptop
pub const STILL_LIFE: &[DrawInstruction] = &[
    DrawInstruction::fixed(
        "table",
        ShapeKind::Cylinder,
        ObjectTransform::new([12.0, 0.3, 12.0], [0.0, -3.0, 0.0]),
        Shading::textured("wood", "wood"),
    ),
    DrawInstruction::fixed(
        "lamp base",
        ShapeKind::Cylinder,
        ObjectTransform::new([0.8, 1.5, 0.8], [0.0, -1.95, -1.0]),
        Shading::textured("gold", "gold"),
    ),
    DrawInstruction::fixed(
        "lamp shade",
        ShapeKind::Cone,
        ObjectTransform::new([1.2, 1.2, 1.2], [0.0, -0.25, -1.0]),
        Shading::textured("glass", "light"),
    ),
    DrawInstruction::fixed(
        "mug",
        ShapeKind::Cylinder,
        ObjectTransform::new([0.6, 0.7, 0.6], [1.5, -2.85, -1.2]).rotated([0.0, 30.0, 0.0]),
        Shading::textured("ceramic", "Mug"),
    ),
    DrawInstruction::fixed(
        "book",
        ShapeKind::Box,
        ObjectTransform::new([1.5, 0.2, 1.0], [-1.2, -2.7, -1.5]),
        Shading::Color([0.5, 0.2, 0.1, 1.0]),
    ),
    DrawInstruction::fixed(
        "laptop base",
        ShapeKind::Box,
        ObjectTransform::new([2.5, 0.2, 1.8], [-0.5, -2.7, 0.5]),
        Shading::Color([0.2, 0.2, 0.2, 1.0]),
    ),
    DrawInstruction::fixed(
        "laptop screen",
        ShapeKind::Plane,
        ObjectTransform::new([2.5, 1.5, 0.2], [-0.5, -1.3, 1.0]).rotated([-60.0, 0.0, 0.0]),
        Shading::Color([0.3, 0.3, 0.3, 1.0]),
    ),
];

/// Ordered draw instructions for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSequence {
    instructions: Cow<'static, [DrawInstruction]>,
}

impl RenderSequence {
    /// Sequence over the given instructions
    pub fn new(instructions: Vec<DrawInstruction>) -> Self {
        Self {
            instructions: Cow::Owned(instructions),
        }
    }

    /// The built-in still life
    pub const fn still_life() -> Self {
        Self {
            instructions: Cow::Borrowed(STILL_LIFE),
        }
    }

    /// Parse a RON script
    pub fn from_ron(text: &str) -> Result<Self, SceneError> {
        let sequence: Self = ron::from_str(text)?;
        if sequence.is_empty() {
            return Err(SceneError::EmptyScript);
        }
        Ok(sequence)
    }

    /// Load a RON script from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let sequence = Self::from_ron(&text)?;
        log::info!("Loaded {} draw instruction(s) from {}", sequence.len(), path.display());
        Ok(sequence)
    }

    /// Render as a pretty-printed RON script
    pub fn to_ron(&self) -> Result<String, SceneError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Instructions in draw order
    pub fn instructions(&self) -> &[DrawInstruction] {
        &self.instructions
    }

    /// Number of instructions
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the sequence draws nothing
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Every shape the sequence draws
    pub fn shapes(&self) -> ShapeSet {
        self.instructions.iter().map(|i| i.shape).collect()
    }

    /// Texture tags referenced, in first-use order without repeats
    pub fn texture_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for instruction in self.instructions.iter() {
            if let Shading::Material { texture, .. } = &instruction.shading {
                if !tags.contains(&&**texture) {
                    tags.push(texture);
                }
            }
        }
        tags
    }

    /// Material tags referenced, in first-use order without repeats
    pub fn material_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for instruction in self.instructions.iter() {
            if let Shading::Material { material, .. } = &instruction.shading {
                if !tags.contains(&&**material) {
                    tags.push(material);
                }
            }
        }
        tags
    }
}

impl Default for RenderSequence {
    fn default() -> Self {
        Self::still_life()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_still_life_contents() {
        let sequence = RenderSequence::still_life();
        assert_eq!(sequence.len(), 7);

        let labels: Vec<&str> = sequence.instructions().iter().map(|i| &*i.label).collect();
        assert_eq!(
            labels,
            ["table", "lamp base", "lamp shade", "mug", "book", "laptop base", "laptop screen"]
        );

        assert_eq!(sequence.texture_tags(), ["wood", "gold", "light", "Mug"]);
        assert_eq!(sequence.material_tags(), ["wood", "gold", "glass", "ceramic"]);
        assert_eq!(
            sequence.shapes(),
            ShapeSet::CYLINDER | ShapeSet::CONE | ShapeSet::BOX | ShapeSet::PLANE
        );
    }

    #[test]
    fn test_rotated_instructions() {
        let sequence = RenderSequence::still_life();
        let mug = &sequence.instructions()[3];
        assert_eq!(mug.transform.rotation_degrees, [0.0, 30.0, 0.0]);

        let screen = &sequence.instructions()[6];
        assert_eq!(screen.shape, ShapeKind::Plane);
        assert_eq!(screen.transform.rotation_degrees, [-60.0, 0.0, 0.0]);
    }

    #[test]
    fn test_script_parses_and_matches_builtin() {
        let text = RenderSequence::still_life().to_ron().unwrap();
        let parsed = RenderSequence::from_ron(&text).unwrap();
        assert_eq!(parsed.instructions(), STILL_LIFE);
    }

    #[test]
    fn test_hand_written_script() {
        let text = r#"(
            instructions: [
                (
                    label: "ball",
                    shape: Sphere,
                    transform: (position: (0.0, 1.0, 0.0)),
                    shading: Material(material: "clay", texture: "none"),
                    uv_scale: Some((2.0, 2.0)),
                ),
                (
                    label: "floor",
                    shape: Plane,
                    shading: Color((0.1, 0.1, 0.1, 1.0)),
                ),
            ],
        )"#;

        let sequence = RenderSequence::from_ron(text).unwrap();
        assert_eq!(sequence.len(), 2);

        let ball = &sequence.instructions()[0];
        assert_eq!(ball.transform.scale, [1.0, 1.0, 1.0]);
        assert_eq!(ball.transform.position, [0.0, 1.0, 0.0]);
        assert_eq!(ball.uv_scale, Some([2.0, 2.0]));

        let floor = &sequence.instructions()[1];
        assert_eq!(floor.transform, ObjectTransform::IDENTITY);
        assert_eq!(floor.uv_scale, None);
    }

    #[test]
    fn test_invalid_scripts_are_rejected() {
        assert!(matches!(
            RenderSequence::from_ron("(instructions: [])"),
            Err(SceneError::EmptyScript)
        ));
        assert!(matches!(
            RenderSequence::from_ron("(instructions: [(label: \"x\", shape: Teapot)])"),
            Err(SceneError::Script(_))
        ));
        assert!(matches!(
            RenderSequence::load("does/not/exist.ron"),
            Err(SceneError::Io { .. })
        ));
    }
}
