//! Per-draw model transforms
//!
//! Every draw composes its model matrix from scratch as
//! `T * Rx * Ry * Rz * S` (column vectors): scale first, then rotate about
//! Z, Y and X in that order, then translate. Nothing is carried between
//! draws.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Scale, Euler rotation in degrees, and position of one draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectTransform {
    /// Per-axis scale
    pub scale: [f32; 3],
    /// Rotation about X, Y and Z in degrees
    pub rotation_degrees: [f32; 3],
    /// World-space position
    pub position: [f32; 3],
}

impl ObjectTransform {
    /// No scaling, rotation or translation
    pub const IDENTITY: Self = Self {
        scale: [1.0, 1.0, 1.0],
        rotation_degrees: [0.0, 0.0, 0.0],
        position: [0.0, 0.0, 0.0],
    };

    /// Scaled and placed, without rotation
    pub const fn new(scale: [f32; 3], position: [f32; 3]) -> Self {
        Self {
            scale,
            rotation_degrees: [0.0, 0.0, 0.0],
            position,
        }
    }

    /// Set the rotation in degrees
    pub const fn rotated(mut self, rotation_degrees: [f32; 3]) -> Self {
        self.rotation_degrees = rotation_degrees;
        self
    }

    /// Model matrix for this transform
    pub fn model_matrix(&self) -> Mat4 {
        compute_model_matrix(
            utils::vec3(self.scale),
            utils::vec3(self.rotation_degrees),
            utils::vec3(self.position),
        )
    }
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Compose `T * Rx * Ry * Rz * S` from degrees
pub fn compute_model_matrix(scale: Vec3, rotation_degrees: Vec3, translation: Vec3) -> Mat4 {
    let rx = Mat4::rotation_x(utils::deg_to_rad(rotation_degrees.x));
    let ry = Mat4::rotation_y(utils::deg_to_rad(rotation_degrees.y));
    let rz = Mat4::rotation_z(utils::deg_to_rad(rotation_degrees.z));

    Mat4::translation(&translation) * rx * ry * rz * Mat4::scaling(&scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Point3, Vec4};
    use approx::assert_relative_eq;

    #[test]
    fn test_quarter_turn_about_y() {
        let m = compute_model_matrix(
            Vec3::new(2.0, 1.0, 1.0),
            Vec3::new(0.0, 90.0, 0.0),
            Vec3::new(5.0, 0.0, 0.0),
        );

        // Local +X is stretched by 2, swung onto -Z, then moved by +5 in X
        let tip = m.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(tip, Point3::new(5.0, 0.0, -2.0), epsilon = 1e-5);

        let direction = m.transform_vector(&Vec3::x()).normalize();
        assert_relative_eq!(direction, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);

        let origin = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(origin, Vec4::new(5.0, 0.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_composition_order_matches_explicit_product() {
        let scale = Vec3::new(1.5, 0.5, 2.0);
        let rotation = Vec3::new(30.0, -45.0, 60.0);
        let translation = Vec3::new(-1.0, 2.0, 3.0);

        let expected = Mat4::translation(&translation)
            * Mat4::rotation_x(30f32.to_radians())
            * Mat4::rotation_y((-45f32).to_radians())
            * Mat4::rotation_z(60f32.to_radians())
            * Mat4::scaling(&scale);

        assert_relative_eq!(
            compute_model_matrix(scale, rotation, translation),
            expected,
            epsilon = 1e-6
        );

        // Rotation order matters; Z-then-X differs from X-then-Z
        let swapped = Mat4::translation(&translation)
            * Mat4::rotation_z(60f32.to_radians())
            * Mat4::rotation_y((-45f32).to_radians())
            * Mat4::rotation_x(30f32.to_radians())
            * Mat4::scaling(&scale);
        assert!((compute_model_matrix(scale, rotation, translation) - swapped).norm() > 1e-3);
    }

    #[test]
    fn test_identity_transform() {
        assert_relative_eq!(ObjectTransform::IDENTITY.model_matrix(), Mat4::identity());
        assert_eq!(ObjectTransform::default(), ObjectTransform::IDENTITY);
    }

    #[test]
    fn test_object_transform_forwards_fields() {
        let t = ObjectTransform::new([0.6, 0.7, 0.6], [1.5, -2.85, -1.2]).rotated([0.0, 30.0, 0.0]);
        let expected = compute_model_matrix(
            Vec3::new(0.6, 0.7, 0.6),
            Vec3::new(0.0, 30.0, 0.0),
            Vec3::new(1.5, -2.85, -1.2),
        );
        assert_relative_eq!(t.model_matrix(), expected);
    }
}
