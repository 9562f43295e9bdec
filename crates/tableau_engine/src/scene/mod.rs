//! # Scene
//!
//! The still-life scene: a render sequence of draw instructions and the
//! [`SceneManager`] that owns the texture and material registries and drives
//! a graphics device through preparation, frames and teardown.

pub mod render_sequence;
pub mod scene_manager;

#[cfg(test)]
mod tests;

pub use render_sequence::{DrawInstruction, RenderSequence, Shading, STILL_LIFE};
pub use scene_manager::{FrameStats, PrepareReport, SceneManager};

use thiserror::Error;

/// Scene script errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// The script file could not be read
    #[error("Failed to read scene script {path}: {source}")]
    Io {
        /// Script path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The script is not a valid render sequence
    #[error("Invalid scene script: {0}")]
    Script(#[from] ron::error::SpannedError),

    /// The sequence could not be written as RON
    #[error("Failed to serialize scene script: {0}")]
    Serialize(#[from] ron::Error),

    /// The script has no draw instructions
    #[error("Scene script contains no draw instructions")]
    EmptyScript,
}
