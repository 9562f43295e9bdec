//! Core primitive types for rendering
//!
//! The procedural shape catalog shared by the scene script and the mesh
//! provider.

pub mod shapes;

// Re-export commonly used types
pub use shapes::{ShapeKind, ShapeSet};
