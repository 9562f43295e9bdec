//! Headless recording device
//!
//! Implements every device trait without a GPU. Each call is appended to an
//! ordered command log, uniforms keep their latest value, textures live in a
//! slot map so leaks and double frees show up, and loaded meshes are tracked
//! as a [`ShapeSet`].
//!
//! Used by the application when no windowed backend is available and by the
//! scene tests to observe exactly what a frame issues.

use std::collections::HashMap;

use slotmap::{DefaultKey, Key, KeyData, SlotMap};

use crate::assets::ImageData;
use crate::render::api::{
    BackendResult, MeshProvider, ShadingStage, TextureDevice, TextureFormat, TextureId,
    TextureParams, UniformValue,
};
use crate::render::primitives::{ShapeKind, ShapeSet};
use crate::render::resources::textures::MAX_TEXTURE_SLOTS;
use crate::render::RenderError;

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    /// Uniform write
    SetUniform {
        /// Uniform name
        name: String,
        /// Written value
        value: UniformValue,
    },
    /// Texture upload
    CreateTexture {
        /// Handle returned to the caller
        texture: TextureId,
        /// Upload format
        format: TextureFormat,
    },
    /// Texture bound to a unit
    BindTexture {
        /// Binding unit
        unit: usize,
        /// Bound texture
        texture: TextureId,
    },
    /// Texture released
    DeleteTexture {
        /// Released texture
        texture: TextureId,
    },
    /// Mesh generated
    LoadMesh(ShapeKind),
    /// Mesh drawn
    DrawMesh(ShapeKind),
}

/// What the device keeps for a live texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRecord {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Upload format
    pub format: TextureFormat,
    /// Sampling parameters
    pub params: TextureParams,
    /// Number of mip levels, including the base level
    pub mip_levels: u32,
}

/// Recording implementation of the device traits
#[derive(Debug)]
pub struct HeadlessDevice {
    commands: Vec<DeviceCommand>,
    uniforms: HashMap<String, UniformValue>,
    textures: SlotMap<DefaultKey, TextureRecord>,
    bound_units: [Option<TextureId>; MAX_TEXTURE_SLOTS],
    loaded_meshes: ShapeSet,
    deleted_textures: usize,
    command_limit: Option<usize>,
    commands_recorded: u64,
}

impl HeadlessDevice {
    /// Create an empty device
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            uniforms: HashMap::new(),
            textures: SlotMap::new(),
            bound_units: [None; MAX_TEXTURE_SLOTS],
            loaded_meshes: ShapeSet::empty(),
            deleted_textures: 0,
            command_limit: None,
            commands_recorded: 0,
        }
    }

    /// Create a device whose command log never exceeds `limit` entries
    ///
    /// When the log is full the oldest half is discarded. Uniform values,
    /// textures and meshes are unaffected.
    pub fn with_command_limit(limit: usize) -> Self {
        Self {
            command_limit: Some(limit.max(1)),
            ..Self::new()
        }
    }

    /// Total number of calls recorded, including discarded ones
    pub fn commands_recorded(&self) -> u64 {
        self.commands_recorded
    }

    /// Every call recorded since creation or the last [`Self::take_commands`]
    pub fn commands(&self) -> &[DeviceCommand] {
        &self.commands
    }

    /// Drain the command log, leaving device state untouched
    pub fn take_commands(&mut self) -> Vec<DeviceCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Latest value written to `name`
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms.get(name).copied()
    }

    /// Number of recorded writes to `name`
    pub fn uniform_writes(&self, name: &str) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DeviceCommand::SetUniform { name: n, .. } if n == name))
            .count()
    }

    /// Shapes drawn, in recorded order
    pub fn draw_calls(&self) -> Vec<ShapeKind> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DeviceCommand::DrawMesh(shape) => Some(*shape),
                _ => None,
            })
            .collect()
    }

    /// Record for a live texture
    pub fn texture(&self, texture: TextureId) -> Option<&TextureRecord> {
        self.textures.get(Self::key(texture))
    }

    /// Whether `texture` has been created and not yet deleted
    pub fn is_live(&self, texture: TextureId) -> bool {
        self.textures.contains_key(Self::key(texture))
    }

    /// Number of textures currently allocated
    pub fn live_texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Number of successful deletions so far
    pub fn deleted_texture_count(&self) -> usize {
        self.deleted_textures
    }

    /// Texture bound to `unit`
    pub fn bound_texture(&self, unit: usize) -> Option<TextureId> {
        self.bound_units.get(unit).copied().flatten()
    }

    /// Meshes generated so far
    pub fn loaded_meshes(&self) -> ShapeSet {
        self.loaded_meshes
    }

    fn record(&mut self, command: DeviceCommand) {
        if let Some(limit) = self.command_limit {
            if self.commands.len() >= limit {
                let keep = limit / 2;
                self.commands.drain(..self.commands.len() - keep);
            }
        }
        self.commands.push(command);
        self.commands_recorded += 1;
    }

    fn key(texture: TextureId) -> DefaultKey {
        DefaultKey::from(KeyData::from_ffi(texture.0))
    }

    fn mip_levels(width: u32, height: u32) -> u32 {
        u32::BITS - width.max(height).leading_zeros()
    }
}

impl Default for HeadlessDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl ShadingStage for HeadlessDevice {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.uniforms.insert(name.to_string(), value);
        self.record(DeviceCommand::SetUniform {
            name: name.to_string(),
            value,
        });
    }
}

impl TextureDevice for HeadlessDevice {
    fn create_texture(
        &mut self,
        image: &ImageData,
        format: TextureFormat,
        params: &TextureParams,
    ) -> BackendResult<TextureId> {
        if image.width == 0 || image.height == 0 {
            return Err(RenderError::TextureUpload(format!(
                "zero-sized image ({}x{})",
                image.width, image.height
            )));
        }

        let expected = image.width as usize * image.height as usize * format.bytes_per_pixel();
        if image.size_bytes() != expected {
            return Err(RenderError::TextureUpload(format!(
                "{:?} upload of {}x{} expects {} bytes, got {}",
                format,
                image.width,
                image.height,
                expected,
                image.size_bytes()
            )));
        }

        let mip_levels = if params.generate_mipmaps {
            Self::mip_levels(image.width, image.height)
        } else {
            1
        };

        let key = self.textures.insert(TextureRecord {
            width: image.width,
            height: image.height,
            format,
            params: *params,
            mip_levels,
        });
        let texture = TextureId(key.data().as_ffi());

        log::debug!(
            "Headless texture {:?}: {}x{} {:?}, {} mip level(s)",
            texture, image.width, image.height, format, mip_levels
        );
        self.record(DeviceCommand::CreateTexture { texture, format });

        Ok(texture)
    }

    fn bind_texture(&mut self, unit: usize, texture: TextureId) -> BackendResult<()> {
        if unit >= MAX_TEXTURE_SLOTS {
            return Err(RenderError::InvalidBindingUnit {
                unit,
                limit: MAX_TEXTURE_SLOTS,
            });
        }
        if !self.is_live(texture) {
            return Err(RenderError::UnknownTexture(texture));
        }

        self.bound_units[unit] = Some(texture);
        self.record(DeviceCommand::BindTexture { unit, texture });
        Ok(())
    }

    fn delete_texture(&mut self, texture: TextureId) {
        if self.textures.remove(Self::key(texture)).is_none() {
            log::warn!("Ignoring delete of unknown texture {:?}", texture);
            return;
        }

        for unit in self.bound_units.iter_mut() {
            if *unit == Some(texture) {
                *unit = None;
            }
        }
        self.deleted_textures += 1;
        self.record(DeviceCommand::DeleteTexture { texture });
    }
}

impl MeshProvider for HeadlessDevice {
    fn load_mesh(&mut self, shape: ShapeKind) {
        self.loaded_meshes |= shape.flag();
        self.record(DeviceCommand::LoadMesh(shape));
    }

    fn draw_mesh(&mut self, shape: ShapeKind) {
        if !self.loaded_meshes.has(shape) {
            log::warn!("Drawing {} before its mesh was loaded", shape);
        }
        self.record(DeviceCommand::DrawMesh(shape));
    }
}
