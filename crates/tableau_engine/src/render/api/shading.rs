//! Shading-stage abstraction
//!
//! The shading stage runs the shader program and accepts named uniform
//! writes. Uniform names are a compatibility surface with the GLSL sources,
//! so they live here as constants rather than being spelled out at call
//! sites.

use crate::foundation::math::{Mat4, Vec2, Vec3, Vec4};

/// A value written to a named uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// 4x4 matrix
    Mat4(Mat4),
    /// 4-component vector
    Vec4(Vec4),
    /// 3-component vector
    Vec3(Vec3),
    /// 2-component vector
    Vec2(Vec2),
    /// Scalar float
    Float(f32),
    /// Scalar int, also used for sampler units
    Int(i32),
    /// Boolean flag
    Bool(bool),
}

impl UniformValue {
    /// The boolean payload, if this is a flag
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            UniformValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The integer payload, if this is an int
    pub fn as_int(&self) -> Option<i32> {
        match self {
            UniformValue::Int(value) => Some(*value),
            _ => None,
        }
    }
}

/// Uniform uploader for the active shader program
///
/// Implementors only need [`ShadingStage::set_uniform`]; the typed setters
/// forward to it.
pub trait ShadingStage {
    /// Write `value` to the uniform called `name`
    fn set_uniform(&mut self, name: &str, value: UniformValue);

    /// Write a 4x4 matrix uniform
    fn set_mat4(&mut self, name: &str, value: &Mat4) {
        self.set_uniform(name, UniformValue::Mat4(*value));
    }

    /// Write a vec4 uniform
    fn set_vec4(&mut self, name: &str, value: Vec4) {
        self.set_uniform(name, UniformValue::Vec4(value));
    }

    /// Write a vec3 uniform
    fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.set_uniform(name, UniformValue::Vec3(value));
    }

    /// Write a vec2 uniform
    fn set_vec2(&mut self, name: &str, value: Vec2) {
        self.set_uniform(name, UniformValue::Vec2(value));
    }

    /// Write a float uniform
    fn set_float(&mut self, name: &str, value: f32) {
        self.set_uniform(name, UniformValue::Float(value));
    }

    /// Write an int uniform
    fn set_int(&mut self, name: &str, value: i32) {
        self.set_uniform(name, UniformValue::Int(value));
    }

    /// Write a bool uniform
    fn set_bool(&mut self, name: &str, value: bool) {
        self.set_uniform(name, UniformValue::Bool(value));
    }
}

/// Uniform names used by the scene shaders
pub mod uniforms {
    /// Model matrix
    pub const MODEL: &str = "model";
    /// Flat RGBA object color
    pub const OBJECT_COLOR: &str = "objectColor";
    /// Sampler unit selector
    pub const OBJECT_TEXTURE: &str = "objectTexture";
    /// Texture-enable flag
    pub const USE_TEXTURE: &str = "bUseTexture";
    /// Lighting-enable flag
    pub const USE_LIGHTING: &str = "bUseLighting";
    /// UV scale
    pub const UV_SCALE: &str = "UVscale";

    /// Fields of the `material` uniform block
    pub mod material {
        /// Ambient color
        pub const AMBIENT_COLOR: &str = "material.ambientColor";
        /// Ambient strength
        pub const AMBIENT_STRENGTH: &str = "material.ambientStrength";
        /// Diffuse color
        pub const DIFFUSE_COLOR: &str = "material.diffuseColor";
        /// Specular color
        pub const SPECULAR_COLOR: &str = "material.specularColor";
        /// Specular exponent
        pub const SHININESS: &str = "material.shininess";
    }

    /// Fields of one `lightSources[i]` entry
    pub mod light {
        /// Position
        pub const POSITION: &str = "position";
        /// Diffuse color
        pub const DIFFUSE_COLOR: &str = "diffuseColor";
        /// Specular color
        pub const SPECULAR_COLOR: &str = "specularColor";
        /// Focal strength
        pub const FOCAL_STRENGTH: &str = "focalStrength";
        /// Specular intensity
        pub const SPECULAR_INTENSITY: &str = "specularIntensity";
    }

    /// Full uniform name of `field` in light source `index`
    pub fn light_source(index: usize, field: &str) -> String {
        format!("lightSources[{}].{}", index, field)
    }
}
