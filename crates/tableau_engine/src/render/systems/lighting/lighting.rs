//! Point lights for the still-life scene
//!
//! Lights are plain descriptors. [`LightSetup::apply`] writes them into the
//! shader's `lightSources` array and switches lighting on; nothing is kept on
//! the device side between preparations.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;
use crate::render::api::{uniforms, ShadingStage};

/// Size of the shader's light array
pub const MAX_LIGHT_SOURCES: usize = 4;

/// One point light
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightSource {
    /// World-space position
    pub position: Vec3,
    /// Diffuse color
    pub diffuse_color: Vec3,
    /// Specular color
    pub specular_color: Vec3,
    /// Specular highlight exponent
    pub focal_strength: f32,
    /// Specular contribution scale
    pub specular_intensity: f32,
}

impl LightSource {
    /// Create a point light with no specular color
    pub fn point(position: Vec3, diffuse_color: Vec3) -> Self {
        Self {
            position,
            diffuse_color,
            specular_color: Vec3::zeros(),
            focal_strength: 32.0,
            specular_intensity: 0.0,
        }
    }

    /// Set the specular response
    pub fn with_specular(mut self, color: Vec3, focal_strength: f32, intensity: f32) -> Self {
        self.specular_color = color;
        self.focal_strength = focal_strength;
        self.specular_intensity = intensity;
        self
    }
}

/// Ordered set of lights, at most [`MAX_LIGHT_SOURCES`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightSetup {
    lights: Vec<LightSource>,
}

impl LightSetup {
    /// Create an empty setup
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a light; lights past [`MAX_LIGHT_SOURCES`] are dropped with a warning
    pub fn add_light(mut self, light: LightSource) -> Self {
        if self.lights.len() >= MAX_LIGHT_SOURCES {
            log::warn!(
                "Light array holds {} lights, ignoring light at {:?}",
                MAX_LIGHT_SOURCES,
                light.position
            );
            return self;
        }
        self.lights.push(light);
        self
    }

    /// Warm key light above the lamp and a soft fill light in front
    pub fn studio() -> Self {
        Self::new()
            .add_light(
                LightSource::point(Vec3::new(0.0, 1.5, 0.0), Vec3::new(0.4, 0.3, 0.2))
                    .with_specular(Vec3::zeros(), 64.0, 0.1),
            )
            .add_light(
                LightSource::point(Vec3::new(0.0, 1.2, 2.0), Vec3::new(0.3, 0.3, 0.3))
                    .with_specular(Vec3::zeros(), 90.0, 0.05),
            )
    }

    /// Lights in array order
    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    /// Write every light to `lightSources[i]`, then enable lighting
    pub fn apply<S>(&self, shading: &mut S)
    where
        S: ShadingStage + ?Sized,
    {
        use uniforms::light;

        for (i, source) in self.lights.iter().enumerate() {
            shading.set_vec3(&uniforms::light_source(i, light::POSITION), source.position);
            shading.set_vec3(&uniforms::light_source(i, light::DIFFUSE_COLOR), source.diffuse_color);
            shading.set_vec3(&uniforms::light_source(i, light::SPECULAR_COLOR), source.specular_color);
            shading.set_float(&uniforms::light_source(i, light::FOCAL_STRENGTH), source.focal_strength);
            shading.set_float(
                &uniforms::light_source(i, light::SPECULAR_INTENSITY),
                source.specular_intensity,
            );
        }
        shading.set_bool(uniforms::USE_LIGHTING, true);

        log::debug!("Applied {} light source(s)", self.lights.len());
    }
}
