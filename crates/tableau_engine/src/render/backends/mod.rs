//! Device implementations
//!
//! Only the headless recording device ships with the crate; windowed
//! backends implement [`crate::render::api::GraphicsDevice`] outside it.

pub mod headless;

pub use headless::{DeviceCommand, HeadlessDevice, TextureRecord};
