//! Scene manager
//!
//! Owns the texture and material registries, the light setup and the render
//! sequence, and holds a borrowed graphics device for its whole lifetime.
//! Without a device every state setter is a no-op and texture loads fail, so
//! the manager can be built and inspected before a context exists.
//!
//! Lifecycle:
//! 1. [`SceneManager::prepare`] loads and binds textures, defines materials,
//!    applies lights and loads every mesh in the catalog
//! 2. [`SceneManager::render_frame`] walks the render sequence once
//! 3. [`SceneManager::teardown`] (also run on drop) releases the textures

use crate::assets::ImageDecoder;
use crate::core::config::AssetConfig;
use crate::foundation::math::{Vec2, Vec3, Vec4};
use crate::render::api::{uniforms, GraphicsDevice, ShadingStage};
use crate::render::primitives::ShapeKind;
use crate::render::resources::materials::{Material, MaterialRegistry};
use crate::render::resources::textures::{TextureError, TextureRegistry};
use crate::render::systems::lighting::LightSetup;
use crate::render::transform::compute_model_matrix;

use super::render_sequence::{DrawInstruction, RenderSequence, Shading};

/// Outcome of [`SceneManager::prepare`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareReport {
    /// Tags registered, in slot order
    pub loaded: Vec<String>,
    /// Tags whose load failed
    pub failed: Vec<String>,
    /// Texture tags the sequence uses that are not registered
    pub missing_textures: Vec<String>,
    /// Material tags the sequence uses that are not defined
    pub missing_materials: Vec<String>,
}

impl PrepareReport {
    /// Whether every texture loaded and every reference resolves
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.missing_textures.is_empty() && self.missing_materials.is_empty()
    }
}

/// Work done by one [`SceneManager::render_frame`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Model matrix uploads
    pub transforms: usize,
    /// Shading states resolved (material/texture or flat color)
    pub shading_resolutions: usize,
    /// Mesh draws issued
    pub draws: usize,
}

/// Scene-state owner for the still life
pub struct SceneManager<'a> {
    device: Option<&'a mut dyn GraphicsDevice>,
    textures: TextureRegistry,
    materials: MaterialRegistry,
    lights: LightSetup,
    sequence: RenderSequence,
    prepared: bool,
    frames_rendered: u64,
}

impl<'a> SceneManager<'a> {
    /// Create a manager over `device` with the built-in still life
    pub fn new(device: Option<&'a mut dyn GraphicsDevice>) -> Self {
        if device.is_none() {
            log::warn!("SceneManager created without a graphics device; rendering is disabled");
        }

        Self {
            device,
            textures: TextureRegistry::new(),
            materials: MaterialRegistry::new(),
            lights: LightSetup::studio(),
            sequence: RenderSequence::still_life(),
            prepared: false,
            frames_rendered: 0,
        }
    }

    /// Read texture images through `decoder` instead of the file system
    ///
    /// Must be called before [`Self::prepare`].
    pub fn with_decoder(mut self, decoder: impl ImageDecoder + 'static) -> Self {
        self.textures = TextureRegistry::with_decoder(decoder);
        self
    }

    /// Draw `sequence` instead of the built-in still life
    pub fn with_sequence(mut self, sequence: RenderSequence) -> Self {
        self.sequence = sequence;
        self
    }

    /// Use `lights` instead of the studio setup
    pub fn with_lights(mut self, lights: LightSetup) -> Self {
        self.lights = lights;
        self
    }

    /// Load textures, define materials, apply lights and load meshes
    ///
    /// Texture failures are logged and skipped. `catalog` replaces the
    /// built-in materials; an invalid catalog falls back to them.
    ///
    /// Preparing again before [`Self::teardown`] keeps textures that are
    /// already registered and reports them as loaded.
    pub fn prepare(&mut self, assets: &AssetConfig, catalog: Option<Vec<Material>>) -> PrepareReport {
        let mut report = PrepareReport::default();

        for entry in &assets.textures {
            if self.textures.slot_of(&entry.tag).is_some() {
                log::debug!("Texture '{}' already registered, keeping it", entry.tag);
                report.loaded.push(entry.tag.clone());
                continue;
            }
            match self.load_texture(&assets.resolve(entry), &entry.tag) {
                Ok(_) => report.loaded.push(entry.tag.clone()),
                Err(_) => report.failed.push(entry.tag.clone()),
            }
        }
        if let Some(device) = self.device.as_deref_mut() {
            self.textures.bind_all(device);
        }

        match catalog {
            Some(catalog) => {
                if let Err(e) = self.materials.define(catalog) {
                    log::warn!("Rejected material catalog ({}), using built-in presets", e);
                    self.materials.define_all();
                }
            }
            None => self.materials.define_all(),
        }

        if let Some(device) = self.device.as_deref_mut() {
            self.lights.apply(device);
            for shape in ShapeKind::ALL {
                device.load_mesh(shape);
            }
        }

        for tag in self.sequence.texture_tags() {
            if self.textures.slot_of(tag).is_none() {
                log::warn!("Scene uses texture '{}' which is not registered", tag);
                report.missing_textures.push(tag.to_string());
            }
        }
        for tag in self.sequence.material_tags() {
            if self.materials.find(tag).is_none() {
                log::warn!("Scene uses material '{}' which is not defined", tag);
                report.missing_materials.push(tag.to_string());
            }
        }

        self.prepared = true;
        log::info!(
            "Scene prepared: {} texture(s) loaded, {} failed, {} material(s), {} instruction(s)",
            report.loaded.len(),
            report.failed.len(),
            self.materials.len(),
            self.sequence.len()
        );

        report
    }

    /// Register the image at `path` under `tag`
    pub fn load_texture(&mut self, path: &std::path::Path, tag: &str) -> Result<usize, TextureError> {
        match self.device.as_deref_mut() {
            Some(device) => self.textures.load(path, tag, device),
            None => {
                let err = TextureError::NoDevice(tag.to_string());
                log::warn!("{}", err);
                Err(err)
            }
        }
    }

    /// Draw every instruction of the sequence once
    pub fn render_frame(&mut self) -> FrameStats {
        let Some(device) = self.device.as_deref_mut() else {
            log::trace!("No graphics device, skipping frame");
            return FrameStats::default();
        };

        if !self.prepared {
            log::warn!("Rendering a frame before the scene was prepared");
        }

        let mut stats = FrameStats::default();
        for instruction in self.sequence.instructions() {
            draw_instruction(device, &self.textures, &self.materials, instruction, &mut stats);
        }

        self.frames_rendered += 1;
        log::trace!("Frame {}: {:?}", self.frames_rendered, stats);
        stats
    }

    /// Upload the model matrix for the given scale, rotation and position
    pub fn set_transformations(&mut self, scale: Vec3, rotation_degrees: Vec3, position: Vec3) {
        if let Some(device) = self.device.as_deref_mut() {
            let model = compute_model_matrix(scale, rotation_degrees, position);
            device.set_mat4(uniforms::MODEL, &model);
        }
    }

    /// Switch to flat color shading
    pub fn set_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        if let Some(device) = self.device.as_deref_mut() {
            apply_color(device, [r, g, b, a]);
        }
    }

    /// Sample the texture registered under `tag`, or disable texturing if none is
    pub fn set_texture(&mut self, tag: &str) {
        if let Some(device) = self.device.as_deref_mut() {
            apply_texture(device, &self.textures, tag);
        }
    }

    /// Set the texture coordinate scale
    pub fn set_texture_uv_scale(&mut self, u: f32, v: f32) {
        if let Some(device) = self.device.as_deref_mut() {
            device.set_vec2(uniforms::UV_SCALE, Vec2::new(u, v));
        }
    }

    /// Upload the material registered under `tag`; unknown tags write nothing
    pub fn set_material(&mut self, tag: &str) {
        if let Some(device) = self.device.as_deref_mut() {
            self.materials.apply(tag, device);
        }
    }

    /// Release every texture; safe to call repeatedly
    pub fn teardown(&mut self) {
        if let Some(device) = self.device.as_deref_mut() {
            self.textures.release_all(device);
        }
        if self.prepared {
            log::info!("Scene torn down after {} frame(s)", self.frames_rendered);
        }
        self.prepared = false;
    }

    /// Texture registry
    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    /// Material registry
    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    /// Render sequence
    pub fn sequence(&self) -> &RenderSequence {
        &self.sequence
    }

    /// Whether a graphics device is bound
    pub fn has_device(&self) -> bool {
        self.device.is_some()
    }

    /// Whether [`Self::prepare`] has run since the last teardown
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Frames rendered since creation
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl Drop for SceneManager<'_> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn draw_instruction(
    device: &mut dyn GraphicsDevice,
    textures: &TextureRegistry,
    materials: &MaterialRegistry,
    instruction: &DrawInstruction,
    stats: &mut FrameStats,
) {
    let model = instruction.transform.model_matrix();
    device.set_mat4(uniforms::MODEL, &model);
    stats.transforms += 1;

    match &instruction.shading {
        Shading::Material { material, texture } => {
            materials.apply(material, device);
            apply_texture(device, textures, texture);
        }
        Shading::Color(rgba) => apply_color(device, *rgba),
    }
    if let Some([u, v]) = instruction.uv_scale {
        device.set_vec2(uniforms::UV_SCALE, Vec2::new(u, v));
    }
    stats.shading_resolutions += 1;

    device.draw_mesh(instruction.shape);
    stats.draws += 1;
}

fn apply_color<S: ShadingStage + ?Sized>(shading: &mut S, rgba: [f32; 4]) {
    shading.set_bool(uniforms::USE_TEXTURE, false);
    shading.set_vec4(uniforms::OBJECT_COLOR, Vec4::from(rgba));
}

fn apply_texture<S: ShadingStage + ?Sized>(shading: &mut S, textures: &TextureRegistry, tag: &str) {
    match textures.slot_of(tag).and_then(|slot| i32::try_from(slot).ok()) {
        Some(slot) => {
            shading.set_bool(uniforms::USE_TEXTURE, true);
            shading.set_int(uniforms::OBJECT_TEXTURE, slot);
        }
        None => {
            log::trace!("Texture '{}' not registered, drawing untextured", tag);
            shading.set_bool(uniforms::USE_TEXTURE, false);
        }
    }
}
