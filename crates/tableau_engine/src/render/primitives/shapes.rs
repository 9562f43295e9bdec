//! Procedural shape catalog
//!
//! The mesh provider generates one mesh per shape kind; the scene only ever
//! refers to shapes by kind.

use std::fmt;

use serde::{Serialize, Deserialize};

/// Shapes the mesh provider can generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Unit box
    Box,
    /// Flat plane in XZ
    Plane,
    /// Cylinder along Y
    Cylinder,
    /// Cone along Y
    Cone,
    /// Triangular prism
    Prism,
    /// Four-sided pyramid
    Pyramid4,
    /// UV sphere
    Sphere,
    /// Cylinder with a narrower top
    TaperedCylinder,
    /// Torus in XY
    Torus,
}

impl ShapeKind {
    /// Every shape in the catalog, in load order
    pub const ALL: [ShapeKind; 9] = [
        ShapeKind::Box,
        ShapeKind::Plane,
        ShapeKind::Cylinder,
        ShapeKind::Cone,
        ShapeKind::Prism,
        ShapeKind::Pyramid4,
        ShapeKind::Sphere,
        ShapeKind::TaperedCylinder,
        ShapeKind::Torus,
    ];

    /// The set flag for this shape
    pub const fn flag(self) -> ShapeSet {
        match self {
            ShapeKind::Box => ShapeSet::BOX,
            ShapeKind::Plane => ShapeSet::PLANE,
            ShapeKind::Cylinder => ShapeSet::CYLINDER,
            ShapeKind::Cone => ShapeSet::CONE,
            ShapeKind::Prism => ShapeSet::PRISM,
            ShapeKind::Pyramid4 => ShapeSet::PYRAMID4,
            ShapeKind::Sphere => ShapeSet::SPHERE,
            ShapeKind::TaperedCylinder => ShapeSet::TAPERED_CYLINDER,
            ShapeKind::Torus => ShapeSet::TORUS,
        }
    }

    /// Human readable name used in logs
    pub const fn name(self) -> &'static str {
        match self {
            ShapeKind::Box => "box",
            ShapeKind::Plane => "plane",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Cone => "cone",
            ShapeKind::Prism => "prism",
            ShapeKind::Pyramid4 => "pyramid4",
            ShapeKind::Sphere => "sphere",
            ShapeKind::TaperedCylinder => "tapered cylinder",
            ShapeKind::Torus => "torus",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags::bitflags! {
    /// A set of shape kinds, e.g. the meshes a device has loaded
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ShapeSet: u16 {
        /// [`ShapeKind::Box`]
        const BOX = 1 << 0;
        /// [`ShapeKind::Plane`]
        const PLANE = 1 << 1;
        /// [`ShapeKind::Cylinder`]
        const CYLINDER = 1 << 2;
        /// [`ShapeKind::Cone`]
        const CONE = 1 << 3;
        /// [`ShapeKind::Prism`]
        const PRISM = 1 << 4;
        /// [`ShapeKind::Pyramid4`]
        const PYRAMID4 = 1 << 5;
        /// [`ShapeKind::Sphere`]
        const SPHERE = 1 << 6;
        /// [`ShapeKind::TaperedCylinder`]
        const TAPERED_CYLINDER = 1 << 7;
        /// [`ShapeKind::Torus`]
        const TORUS = 1 << 8;
    }
}

impl ShapeSet {
    /// Whether `shape` is in the set
    pub fn has(self, shape: ShapeKind) -> bool {
        self.contains(shape.flag())
    }
}

impl FromIterator<ShapeKind> for ShapeSet {
    fn from_iter<I: IntoIterator<Item = ShapeKind>>(iter: I) -> Self {
        iter.into_iter().fold(ShapeSet::empty(), |set, shape| set | shape.flag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_flags_are_distinct() {
        let all: ShapeSet = ShapeKind::ALL.into_iter().collect();
        assert_eq!(all, ShapeSet::all());
        assert_eq!(all.bits().count_ones() as usize, ShapeKind::ALL.len());
    }

    #[test]
    fn test_set_membership() {
        let set: ShapeSet = [ShapeKind::Box, ShapeKind::Cone].into_iter().collect();
        assert!(set.has(ShapeKind::Box));
        assert!(set.has(ShapeKind::Cone));
        assert!(!set.has(ShapeKind::Torus));
        assert!(ShapeSet::default().is_empty());
    }

    #[test]
    fn test_shape_serializes_by_name() {
        let text = ron::to_string(&ShapeKind::TaperedCylinder).unwrap();
        assert_eq!(text, "TaperedCylinder");
        assert_eq!(ron::from_str::<ShapeKind>("Pyramid4").unwrap(), ShapeKind::Pyramid4);
        assert_eq!(ShapeKind::TaperedCylinder.to_string(), "tapered cylinder");
    }
}
