//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the handful of helpers the scene code
//! needs. All matrices act on column vectors (`M * v`), Y-up right-handed.

pub use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Build a `Vec3` from a plain array, as stored in scene scripts and configs
    pub fn vec3(v: [f32; 3]) -> Vec3 {
        Vec3::new(v[0], v[1], v[2])
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis (radians)
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis (radians)
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis (radians)
    fn rotation_z(angle: f32) -> Mat4;

    /// Create a translation matrix
    fn translation(offset: &Vec3) -> Mat4;

    /// Create a per-axis scaling matrix
    fn scaling(factors: &Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn translation(offset: &Vec3) -> Mat4 {
        Mat4::new_translation(offset)
    }

    fn scaling(factors: &Vec3) -> Mat4 {
        Mat4::new_nonuniform_scaling(factors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_degree_conversion_round_trip() {
        assert_relative_eq!(utils::deg_to_rad(180.0), constants::PI, epsilon = EPSILON);
        assert_relative_eq!(utils::rad_to_deg(constants::PI / 2.0), 90.0, epsilon = 1e-4);
    }

    #[test]
    fn test_axis_rotations_are_right_handed() {
        let quarter = constants::PI / 2.0;

        // +Y rotated about X lands on +Z
        let y = Mat4::rotation_x(quarter).transform_vector(&Vec3::y());
        assert_relative_eq!(y, Vec3::z(), epsilon = EPSILON);

        // +Z rotated about Y lands on +X
        let z = Mat4::rotation_y(quarter).transform_vector(&Vec3::z());
        assert_relative_eq!(z, Vec3::x(), epsilon = EPSILON);

        // +X rotated about Z lands on +Y
        let x = Mat4::rotation_z(quarter).transform_vector(&Vec3::x());
        assert_relative_eq!(x, Vec3::y(), epsilon = EPSILON);
    }

    #[test]
    fn test_translation_ignores_vectors() {
        let m = Mat4::translation(&Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(m.transform_vector(&Vec3::x()), Vec3::x(), epsilon = EPSILON);
        assert_relative_eq!(
            m.transform_point(&Point3::origin()),
            Point3::new(1.0, 2.0, 3.0),
            epsilon = EPSILON
        );
    }
}
