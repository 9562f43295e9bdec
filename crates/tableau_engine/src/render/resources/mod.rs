//! Scene resources
//!
//! GPU textures and lighting materials, each owned by a registry that keeps
//! an ordered list as the source of truth and a derived tag index.

pub mod materials;
pub mod textures;
