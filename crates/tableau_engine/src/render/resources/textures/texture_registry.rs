//! Texture registry
//!
//! Owns every GPU texture the scene uses and hands out binding slots. The
//! ordered entry list is the source of truth: an entry's position is its slot
//! and the binding unit it is bound to. The tag lookup is derived from it.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::assets::{AssetError, FileImageDecoder, ImageDecoder};
use crate::render::api::{TextureDevice, TextureFormat, TextureId, TextureParams};
use crate::render::RenderError;

/// Number of sampler slots the scene shader exposes
pub const MAX_TEXTURE_SLOTS: usize = 16;

/// Texture loading errors
///
/// None of these leave anything registered or allocated on the device.
#[derive(Error, Debug)]
pub enum TextureError {
    /// The tag is already registered
    #[error("Texture tag '{0}' is already registered")]
    DuplicateTag(String),

    /// Every slot is taken
    #[error("Texture registry full ({limit} slots), cannot register '{tag}'")]
    RegistryFull {
        /// Rejected tag
        tag: String,
        /// Slot limit
        limit: usize,
    },

    /// The image could not be decoded
    #[error("Could not load image for texture '{tag}': {source}")]
    Decode {
        /// Rejected tag
        tag: String,
        /// Decoder failure
        #[source]
        source: AssetError,
    },

    /// The image has a channel count the shader cannot sample
    #[error("Texture '{tag}' has {channels} channel(s), only RGB and RGBA images are supported")]
    UnsupportedChannels {
        /// Rejected tag
        tag: String,
        /// Channel count reported by the decoder
        channels: u8,
    },

    /// The device refused the upload
    #[error("Device rejected texture '{tag}': {source}")]
    Upload {
        /// Rejected tag
        tag: String,
        /// Device failure
        #[source]
        source: RenderError,
    },

    /// No device is bound to upload to
    #[error("No graphics device bound, cannot load texture '{0}'")]
    NoDevice(String),
}

/// One registered texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureEntry {
    /// Device handle
    pub handle: TextureId,
    /// Registration tag
    pub tag: String,
}

/// Slot-allocating texture registry
pub struct TextureRegistry {
    /// Registered textures; index == slot
    entries: Vec<TextureEntry>,
    /// Tag -> slot, derived from `entries`
    slot_lookup: HashMap<String, usize>,
    decoder: Box<dyn ImageDecoder>,
    params: TextureParams,
}

impl TextureRegistry {
    /// Create an empty registry reading images from disk
    pub fn new() -> Self {
        Self::with_decoder(FileImageDecoder)
    }

    /// Create an empty registry using `decoder` for image data
    pub fn with_decoder(decoder: impl ImageDecoder + 'static) -> Self {
        Self {
            entries: Vec::with_capacity(MAX_TEXTURE_SLOTS),
            slot_lookup: HashMap::with_capacity(MAX_TEXTURE_SLOTS),
            decoder: Box::new(decoder),
            params: TextureParams::default(),
        }
    }

    /// Decode `path`, upload it and register it under `tag`
    ///
    /// Returns the assigned slot. Failures are logged and leave the registry
    /// and the device unchanged.
    pub fn load<D>(&mut self, path: &Path, tag: &str, device: &mut D) -> Result<usize, TextureError>
    where
        D: TextureDevice + ?Sized,
    {
        let result = self.try_load(path, tag, device);
        match &result {
            Ok(slot) => log::info!("Loaded texture '{}' from {} into slot {}", tag, path.display(), slot),
            Err(e) => log::warn!("{}", e),
        }
        result
    }

    fn try_load<D>(&mut self, path: &Path, tag: &str, device: &mut D) -> Result<usize, TextureError>
    where
        D: TextureDevice + ?Sized,
    {
        if self.slot_lookup.contains_key(tag) {
            return Err(TextureError::DuplicateTag(tag.to_string()));
        }

        // Checked before decoding so a full registry never touches the device
        if self.is_full() {
            return Err(TextureError::RegistryFull {
                tag: tag.to_string(),
                limit: MAX_TEXTURE_SLOTS,
            });
        }

        let image = self.decoder.decode(path).map_err(|source| TextureError::Decode {
            tag: tag.to_string(),
            source,
        })?;

        log::debug!(
            "Decoded '{}': {}x{}, {} channel(s)",
            tag, image.width, image.height, image.channels
        );

        let format = TextureFormat::from_channels(image.channels).ok_or_else(|| {
            TextureError::UnsupportedChannels {
                tag: tag.to_string(),
                channels: image.channels,
            }
        })?;

        let handle = device
            .create_texture(&image, format, &self.params)
            .map_err(|source| TextureError::Upload {
                tag: tag.to_string(),
                source,
            })?;

        // Pixel data lives on the device from here on
        drop(image);

        let slot = self.entries.len();
        self.entries.push(TextureEntry {
            handle,
            tag: tag.to_string(),
        });
        self.slot_lookup.insert(tag.to_string(), slot);

        Ok(slot)
    }

    /// Bind every texture to the unit matching its slot, in slot order
    ///
    /// Returns the number of textures bound. A failed bind is logged and the
    /// remaining textures are still bound.
    pub fn bind_all<D>(&self, device: &mut D) -> usize
    where
        D: TextureDevice + ?Sized,
    {
        let mut bound = 0;
        for (slot, entry) in self.entries.iter().enumerate() {
            match device.bind_texture(slot, entry.handle) {
                Ok(()) => bound += 1,
                Err(e) => log::warn!("Failed to bind texture '{}' to unit {}: {}", entry.tag, slot, e),
            }
        }
        log::debug!("Bound {} of {} texture(s)", bound, self.entries.len());
        bound
    }

    /// Device handle registered under `tag`
    pub fn id_of(&self, tag: &str) -> Option<TextureId> {
        self.slot_of(tag).map(|slot| self.entries[slot].handle)
    }

    /// Slot registered under `tag`
    pub fn slot_of(&self, tag: &str) -> Option<usize> {
        self.slot_lookup
            .get(tag)
            .copied()
            .filter(|&slot| slot < self.entries.len())
    }

    /// Registered textures in slot order
    pub fn entries(&self) -> &[TextureEntry] {
        &self.entries
    }

    /// Number of registered textures
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no texture is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether every slot is taken
    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_TEXTURE_SLOTS
    }

    /// Release every texture on the device and forget all entries
    ///
    /// Safe to call any number of times.
    pub fn release_all<D>(&mut self, device: &mut D)
    where
        D: TextureDevice + ?Sized,
    {
        if self.entries.is_empty() {
            return;
        }

        log::debug!("Releasing {} texture(s)", self.entries.len());
        for entry in self.entries.drain(..) {
            device.delete_texture(entry.handle);
        }
        self.slot_lookup.clear();
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TextureRegistry {
    fn drop(&mut self) {
        if !self.entries.is_empty() {
            log::warn!(
                "TextureRegistry dropped with {} unreleased texture(s)",
                self.entries.len()
            );
        }
    }
}
