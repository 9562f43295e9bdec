//! Rendering systems
//!
//! Scene-wide state pushed to the shading stage once per preparation.

pub mod lighting;
