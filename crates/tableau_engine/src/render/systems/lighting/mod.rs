//! Lighting system
//!
//! Fixed point lights written to the shader's light array.

pub mod lighting;

// Re-export all lighting types
pub use lighting::*;
