//! wgpu render backend for the terrain viewer.
//!
//! Uploads the terrain as three buffers (positions, colors, indices) once and
//! draws it with a single indexed call per frame.
//!
//! # Invariants
//! - GPU resources are created once and owned by `TerrainRenderer`.
//! - The renderer never mutates scene state; it reads a `RenderView`.

mod gpu;
mod shaders;

pub use gpu::{CLEAR_COLOR, DEPTH_FORMAT, TerrainRenderer};
